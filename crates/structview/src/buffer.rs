// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Raw record buffers.
//!
//! [`RecordBuffer`] is a read-only, bounds-checked view over bytes written
//! by a native producer. Reads are exact-width and native-endian, and do
//! not require the slice itself to be aligned.
//!
//! [`RecordWriter`] is the producer side: it builds a zeroed, padded buffer
//! for a [`Layout`] and stores dynamic values at their field offsets.

use crate::error::ProjectError;
use crate::layout::{Layout, ResolvedField};
use crate::types::TypeTag;
use crate::value::{DynamicObject, DynamicValue};

/// Read-only view over one raw record.
#[derive(Debug, Clone, Copy)]
pub struct RecordBuffer<'a> {
    bytes: &'a [u8],
}

macro_rules! read_scalar {
    ($name:ident, $ty:ty) => {
        #[doc = concat!("Read a native-endian `", stringify!($ty), "` at `offset`.")]
        pub fn $name(&self, offset: usize) -> Result<$ty, ProjectError> {
            self.read_array(offset).map(<$ty>::from_ne_bytes)
        }
    };
}

impl<'a> RecordBuffer<'a> {
    /// View over `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// View `len` bytes of foreign memory starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` bytes for `'a`, and the memory
    /// must not be written to while the view exists. When projecting, the
    /// bytes must have been produced for the layout being applied.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        // SAFETY: forwarded to the caller's contract above.
        Self {
            bytes: std::slice::from_raw_parts(ptr, len),
        }
    }

    /// Length of the view in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the view has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Underlying bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Copy `N` bytes starting at `offset`.
    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], ProjectError> {
        let end = offset.checked_add(N).filter(|end| *end <= self.bytes.len());
        match end {
            Some(end) => {
                let mut out = [0u8; N];
                out.copy_from_slice(&self.bytes[offset..end]);
                Ok(out)
            }
            None => Err(ProjectError::OutOfBounds {
                offset,
                width: N,
                len: self.bytes.len(),
            }),
        }
    }

    /// Read a `bool`; any non-zero byte is `true`.
    pub fn read_bool(&self, offset: usize) -> Result<bool, ProjectError> {
        self.read_array::<1>(offset).map(|b| b[0] != 0)
    }

    read_scalar!(read_i8, i8);
    read_scalar!(read_u8, u8);
    read_scalar!(read_i16, i16);
    read_scalar!(read_u16, u16);
    read_scalar!(read_i32, i32);
    read_scalar!(read_u32, u32);
    read_scalar!(read_i64, i64);
    read_scalar!(read_f32, f32);
    read_scalar!(read_f64, f64);
}

impl<'a> From<&'a [u8]> for RecordBuffer<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

/// Builds a raw record for a [`Layout`].
#[derive(Debug)]
pub struct RecordWriter<'l> {
    layout: &'l Layout,
    bytes: Vec<u8>,
}

impl<'l> RecordWriter<'l> {
    /// Zero-filled record of `layout.size()` bytes.
    pub fn new(layout: &'l Layout) -> Self {
        Self {
            layout,
            bytes: vec![0u8; layout.size()],
        }
    }

    /// Layout the record is written for.
    pub fn layout(&self) -> &'l Layout {
        self.layout
    }

    /// Store `value` into the field called `name`.
    pub fn set(&mut self, name: &str, value: DynamicValue) -> Result<&mut Self, ProjectError> {
        let layout = self.layout;
        let field = layout
            .field(name)
            .ok_or_else(|| ProjectError::UnknownField {
                record: layout.record_name().to_string(),
                field: name.to_string(),
            })?;
        write_field(&mut self.bytes, field, &value)?;
        Ok(self)
    }

    /// Finished record bytes.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encode `object` as a raw record laid out by `layout`.
///
/// Every layout field must be present in `object`; extra properties are
/// ignored. Padding bytes are zero.
pub fn encode_record(layout: &Layout, object: &DynamicObject) -> Result<Vec<u8>, ProjectError> {
    let mut writer = RecordWriter::new(layout);
    for field in layout.fields() {
        let value = object
            .get(&field.name)
            .ok_or_else(|| ProjectError::MissingField(field.name.clone()))?;
        write_field(&mut writer.bytes, field, value)?;
    }
    Ok(writer.finish())
}

fn write_field(
    bytes: &mut [u8],
    field: &ResolvedField,
    value: &DynamicValue,
) -> Result<(), ProjectError> {
    let mut scratch = [0u8; 8];
    let encoded = encode_scalar(field, value, &mut scratch)?;
    let end = field
        .offset
        .checked_add(encoded.len())
        .filter(|end| *end <= bytes.len())
        .ok_or(ProjectError::OutOfBounds {
            offset: field.offset,
            width: encoded.len(),
            len: bytes.len(),
        })?;
    bytes[field.offset..end].copy_from_slice(encoded);
    Ok(())
}

/// Native bytes of `value` for `field`'s tag.
///
/// Integer tags take any integer value that fits; float tags take doubles
/// and integers. `float` narrows like a C assignment.
fn encode_scalar<'s>(
    field: &ResolvedField,
    value: &DynamicValue,
    scratch: &'s mut [u8; 8],
) -> Result<&'s [u8], ProjectError> {
    let mismatch = || ProjectError::TypeMismatch {
        field: field.name.clone(),
        expected: field.tag.name(),
        found: value.kind_name().to_string(),
    };
    let out_of_range = |v: i64| ProjectError::ValueOutOfRange {
        field: field.name.clone(),
        value: v.to_string(),
    };

    macro_rules! put {
        ($bytes:expr) => {{
            let b = $bytes;
            scratch[..b.len()].copy_from_slice(&b);
            Ok(&scratch[..b.len()])
        }};
    }
    macro_rules! put_int {
        ($ty:ty) => {{
            let wide = value.as_i64().ok_or_else(mismatch)?;
            let narrow = <$ty>::try_from(wide).map_err(|_| out_of_range(wide))?;
            put!(narrow.to_ne_bytes())
        }};
    }

    let float = || match value {
        DynamicValue::Double(v) => Ok(*v),
        other => other.as_i64().map(|v| v as f64).ok_or_else(mismatch),
    };

    match field.tag {
        TypeTag::Bool => match value {
            DynamicValue::Bool(v) => put!([u8::from(*v)]),
            _ => Err(mismatch()),
        },
        TypeTag::I8 => put_int!(i8),
        TypeTag::U8 => put_int!(u8),
        TypeTag::I16 => put_int!(i16),
        TypeTag::U16 => put_int!(u16),
        TypeTag::I32 => put_int!(i32),
        TypeTag::U32 => put_int!(u32),
        TypeTag::I64 => put_int!(i64),
        TypeTag::F32 => put!((float()? as f32).to_ne_bytes()),
        TypeTag::F64 => put!(float()?.to_ne_bytes()),
    }
}
