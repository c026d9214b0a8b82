// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compiled record layouts.
//!
//! Offsets follow the C struct rules of the compiling target: each field
//! starts at the previous field's end rounded up to its own alignment, and
//! the total size is rounded up to the largest field alignment.

use crate::config::MAX_FIELDS_PER_RECORD;
use crate::error::SchemaError;
use crate::schema::FieldSpec;
use crate::types::TypeTag;
use serde::Serialize;
use std::collections::HashSet;

/// Round `offset` up to the next multiple of `align` (a power of two).
#[inline]
pub(crate) const fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}

/// A field with its computed position inside the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedField {
    pub name: String,
    #[serde(rename = "type")]
    pub tag: TypeTag,
    pub offset: usize,
    pub size: usize,
    pub align: usize,
}

impl ResolvedField {
    /// First byte after this field.
    pub fn end_offset(&self) -> usize {
        self.offset + self.size
    }
}

/// Offset-resolved form of one record type.
///
/// Immutable once built; shared as `Arc<Layout>` through the
/// [`LayoutCache`](crate::LayoutCache).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Layout {
    record_name: String,
    size: usize,
    align: usize,
    fields: Vec<ResolvedField>,
}

impl Layout {
    /// Lay out `specs` in declaration order.
    ///
    /// Fails with [`SchemaError::EmptyRecord`], [`SchemaError::TooManyFields`]
    /// or [`SchemaError::DuplicateFieldName`]; a valid layout always projects
    /// to exactly one property per field.
    pub fn from_specs(
        record_name: impl Into<String>,
        specs: impl IntoIterator<Item = FieldSpec>,
    ) -> Result<Self, SchemaError> {
        let record_name = record_name.into();
        let specs: Vec<FieldSpec> = specs.into_iter().collect();
        validate_specs(&record_name, &specs)?;

        let mut fields = Vec::with_capacity(specs.len());
        let mut cursor = 0usize;
        let mut max_align = 1usize;

        for spec in specs {
            let size = spec.tag.size();
            let align = spec.tag.alignment();
            let offset = align_up(cursor, align);
            cursor = offset + size;
            max_align = max_align.max(align);
            fields.push(ResolvedField {
                name: spec.name,
                tag: spec.tag,
                offset,
                size,
                align,
            });
        }

        Ok(Self {
            record_name,
            size: align_up(cursor, max_align),
            align: max_align,
            fields,
        })
    }

    /// Record name this layout was compiled for.
    pub fn record_name(&self) -> &str {
        &self.record_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Field called `name`.
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declaration index of the field called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Total record size including trailing padding.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest field alignment.
    pub fn align(&self) -> usize {
        self.align
    }

    /// Bytes of interior and trailing padding.
    pub fn padding_bytes(&self) -> usize {
        self.size - self.fields.iter().map(|f| f.size).sum::<usize>()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false` for a constructed layout.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn validate_specs(record: &str, specs: &[FieldSpec]) -> Result<(), SchemaError> {
    if specs.is_empty() {
        return Err(SchemaError::EmptyRecord(record.to_string()));
    }
    if specs.len() > MAX_FIELDS_PER_RECORD {
        return Err(SchemaError::TooManyFields {
            record: record.to_string(),
            count: specs.len(),
            max: MAX_FIELDS_PER_RECORD,
        });
    }
    let mut seen = HashSet::with_capacity(specs.len());
    for spec in specs {
        if !seen.insert(spec.name.as_str()) {
            return Err(SchemaError::DuplicateFieldName {
                record: record.to_string(),
                field: spec.name.clone(),
            });
        }
    }
    Ok(())
}

/// Fluent builder for layouts declared in code.
#[derive(Debug)]
pub struct LayoutBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl LayoutBuilder {
    /// Start a layout for record `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, tag: TypeTag) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            tag,
        });
        self
    }

    /// Compute offsets; same checks as [`Layout::from_specs`].
    pub fn build(self) -> Result<Layout, SchemaError> {
        Layout::from_specs(self.name, self.fields)
    }
}
