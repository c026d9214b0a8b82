// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field and record projection.
//!
//! A field is projected by an exact-width native read at its offset followed
//! by conversion to the host's nearest value kind (see the table in
//! [`crate::types`]). The dispatch is a `match` over the closed [`TypeTag`]
//! enum, so every tag the registry can hand out has a projector.
//!
//! A record is projected by walking its [`Layout`] in declaration order and
//! setting one property per field on a fresh object.

use crate::buffer::RecordBuffer;
use crate::cache::LayoutCache;
use crate::config::ProjectorConfig;
use crate::error::ProjectError;
use crate::host::{HostRuntime, NativeHost};
use crate::layout::Layout;
use crate::types::TypeTag;
use crate::value::{DynamicObject, DynamicValue};
use std::fmt;

fn host_error<E: fmt::Display>(e: E) -> ProjectError {
    ProjectError::Host(e.to_string())
}

/// Project the scalar at `offset` through `host`.
pub fn project_field_with<H: HostRuntime>(
    host: &mut H,
    tag: TypeTag,
    buffer: &RecordBuffer<'_>,
    offset: usize,
) -> Result<H::Value, ProjectError> {
    let value = match tag {
        TypeTag::Bool => host.create_bool(buffer.read_bool(offset)?),
        TypeTag::I8 => host.create_int32(i32::from(buffer.read_i8(offset)?)),
        TypeTag::U8 => host.create_uint32(u32::from(buffer.read_u8(offset)?)),
        TypeTag::I16 => host.create_int32(i32::from(buffer.read_i16(offset)?)),
        TypeTag::U16 => host.create_uint32(u32::from(buffer.read_u16(offset)?)),
        TypeTag::I32 => host.create_int32(buffer.read_i32(offset)?),
        TypeTag::U32 => host.create_uint32(buffer.read_u32(offset)?),
        TypeTag::I64 => host.create_int64(buffer.read_i64(offset)?),
        // float widens exactly; both widths share the host's double
        TypeTag::F32 => host.create_double(f64::from(buffer.read_f32(offset)?)),
        TypeTag::F64 => host.create_double(buffer.read_f64(offset)?),
    };
    value.map_err(host_error)
}

/// Project the scalar at `offset` into a [`DynamicValue`].
pub fn project_field(
    tag: TypeTag,
    buffer: &RecordBuffer<'_>,
    offset: usize,
) -> Result<DynamicValue, ProjectError> {
    project_field_with(&mut NativeHost, tag, buffer, offset)
}

/// Project a whole record through `host`.
///
/// Fails with [`ProjectError::LayoutMismatch`] if `buffer` is shorter than
/// the layout. A buffer that is long enough but was written for another
/// record type cannot be detected and projects garbage values.
pub fn project_record_with<H: HostRuntime>(
    host: &mut H,
    layout: &Layout,
    buffer: &RecordBuffer<'_>,
) -> Result<H::Object, ProjectError> {
    if buffer.len() < layout.size() {
        return Err(ProjectError::LayoutMismatch {
            record: layout.record_name().to_string(),
            need: layout.size(),
            have: buffer.len(),
        });
    }

    let mut object = host.create_object(layout.len()).map_err(host_error)?;
    for field in layout.fields() {
        let value = project_field_with(host, field.tag, buffer, field.offset)?;
        host.set_named_property(&mut object, &field.name, value)
            .map_err(host_error)?;
    }
    Ok(object)
}

/// Project a whole record into a [`DynamicObject`].
pub fn project_record(
    layout: &Layout,
    buffer: &RecordBuffer<'_>,
) -> Result<DynamicObject, ProjectError> {
    project_record_with(&mut NativeHost, layout, buffer)
}

/// Projects `(record name, bytes)` pairs using layouts from a [`LayoutCache`].
#[derive(Debug, Clone)]
pub struct RecordProjector<'c> {
    cache: &'c LayoutCache,
    config: ProjectorConfig,
}

impl<'c> RecordProjector<'c> {
    /// Projector over `cache` with the default config.
    pub fn new(cache: &'c LayoutCache) -> Self {
        Self::with_config(cache, ProjectorConfig::default())
    }

    /// Projector over `cache` with `config`.
    pub fn with_config(cache: &'c LayoutCache, config: ProjectorConfig) -> Self {
        Self { cache, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Project `bytes` as a `record_name` record.
    pub fn project(&self, record_name: &str, bytes: &[u8]) -> Result<DynamicObject, ProjectError> {
        self.project_with(&mut NativeHost, record_name, RecordBuffer::new(bytes))
    }

    /// Project `buffer` as a `record_name` record through `host`.
    pub fn project_with<H: HostRuntime>(
        &self,
        host: &mut H,
        record_name: &str,
        buffer: RecordBuffer<'_>,
    ) -> Result<H::Object, ProjectError> {
        let layout = self
            .cache
            .get(record_name)
            .ok_or_else(|| ProjectError::UnknownRecord(record_name.to_string()))?;

        if self.config.strict_size && buffer.len() != layout.size() {
            return Err(ProjectError::LayoutMismatch {
                record: record_name.to_string(),
                need: layout.size(),
                have: buffer.len(),
            });
        }

        let object = project_record_with(host, &layout, &buffer)?;
        if self.config.trace_projection {
            log::debug!(
                "[projector] '{}': {} field(s) from {} byte(s)",
                record_name,
                layout.len(),
                buffer.len()
            );
        }
        Ok(object)
    }
}
