// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: schema type names to native scalar descriptors.
//!
//! # Supported types
//!
//! | Tag    | Schema name(s)            | Native | Dynamic value |
//! |--------|---------------------------|--------|---------------|
//! | `Bool` | `bool`                    | `bool` | `Bool`        |
//! | `I8`   | `i8`, `int8`              | `i8`   | `Int32`       |
//! | `U8`   | `u8`, `uint8`             | `u8`   | `Uint32`      |
//! | `I16`  | `i16`, `int16`            | `i16`  | `Int32`       |
//! | `U16`  | `u16`, `uint16`           | `u16`  | `Uint32`      |
//! | `I32`  | `i32`, `int32`, `int`     | `i32`  | `Int32`       |
//! | `U32`  | `u32`, `uint32`           | `u32`  | `Uint32`      |
//! | `I64`  | `i64`, `int64`            | `i64`  | `Int64`       |
//! | `F32`  | `float`, `f32`            | `f32`  | `Double`      |
//! | `F64`  | `double`, `f64`           | `f64`  | `Double`      |
//!
//! `F32` and `F64` both become the single `Double` dynamic value, and the
//! narrow integers widen to 32-bit ones. The convergence only changes the
//! representation: every source value is exactly representable in its
//! dynamic form, so converting back recovers the original bits.
//!
//! Sizes and alignments come from `core::mem` on the compiling target, so
//! they always agree with how a native writer on that target lays out a
//! `#[repr(C)]` / C struct.

use crate::error::SchemaError;
use std::collections::HashMap;
use std::fmt;
use std::mem::{align_of, size_of};
use std::sync::OnceLock;

/// Closed set of supported scalar field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    F32,
    F64,
}

impl TypeTag {
    /// Every tag, in declaration order.
    pub const ALL: [TypeTag; 10] = [
        Self::Bool,
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::F32,
        Self::F64,
    ];

    /// Native size in bytes on the compiling target.
    pub const fn size(self) -> usize {
        match self {
            Self::Bool => size_of::<bool>(),
            Self::I8 => size_of::<i8>(),
            Self::U8 => size_of::<u8>(),
            Self::I16 => size_of::<i16>(),
            Self::U16 => size_of::<u16>(),
            Self::I32 => size_of::<i32>(),
            Self::U32 => size_of::<u32>(),
            Self::I64 => size_of::<i64>(),
            Self::F32 => size_of::<f32>(),
            Self::F64 => size_of::<f64>(),
        }
    }

    /// Native alignment in bytes on the compiling target.
    pub const fn alignment(self) -> usize {
        match self {
            Self::Bool => align_of::<bool>(),
            Self::I8 => align_of::<i8>(),
            Self::U8 => align_of::<u8>(),
            Self::I16 => align_of::<i16>(),
            Self::U16 => align_of::<u16>(),
            Self::I32 => align_of::<i32>(),
            Self::U32 => align_of::<u32>(),
            Self::I64 => align_of::<i64>(),
            Self::F32 => align_of::<f32>(),
            Self::F64 => align_of::<f64>(),
        }
    }

    /// Canonical schema name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::F32 => "float",
            Self::F64 => "double",
        }
    }

    /// Accepted alternative schema names.
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Bool => &[],
            Self::I8 => &["int8"],
            Self::U8 => &["uint8"],
            Self::I16 => &["int16"],
            Self::U16 => &["uint16"],
            Self::I32 => &["int32", "int"],
            Self::U32 => &["uint32"],
            Self::I64 => &["int64"],
            Self::F32 => &["f32"],
            Self::F64 => &["f64"],
        }
    }

    /// True for `F32` / `F64`.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for TypeTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Size, alignment and tag of one scalar kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub tag: TypeTag,
    pub size: usize,
    pub alignment: usize,
}

impl TypeDescriptor {
    /// Descriptor for `tag` using the target's native size and alignment.
    pub const fn native(tag: TypeTag) -> Self {
        Self {
            tag,
            size: tag.size(),
            alignment: tag.alignment(),
        }
    }
}

/// Immutable map from schema type names to [`TypeDescriptor`]s.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<&'static str, TypeDescriptor>,
}

impl TypeRegistry {
    /// Registry holding every [`TypeTag`] under its canonical name and aliases.
    pub fn builtin() -> Self {
        let mut types = HashMap::new();
        for tag in TypeTag::ALL {
            let desc = TypeDescriptor::native(tag);
            let previous = types.insert(tag.name(), desc);
            debug_assert!(previous.is_none(), "duplicate type name {}", tag.name());
            for alias in tag.aliases() {
                let previous = types.insert(*alias, desc);
                debug_assert!(previous.is_none(), "duplicate type alias {}", alias);
            }
        }
        Self { types }
    }

    /// Process-wide builtin registry, initialised on first use.
    pub fn global() -> &'static TypeRegistry {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Look up a type name without record context.
    pub fn lookup(&self, type_name: &str) -> Option<TypeDescriptor> {
        self.types.get(type_name).copied()
    }

    /// Resolve the type of `record.field`.
    ///
    /// Fails with [`SchemaError::UnknownType`] naming the record and field.
    pub fn resolve(
        &self,
        record: &str,
        field: &str,
        type_name: &str,
    ) -> Result<TypeDescriptor, SchemaError> {
        self.lookup(type_name)
            .ok_or_else(|| SchemaError::UnknownType {
                record: record.to_string(),
                field: field.to_string(),
                type_name: type_name.to_string(),
            })
    }

    /// Canonical type names, sorted; aliases are accepted but not listed.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = TypeTag::ALL
            .iter()
            .map(|tag| tag.name())
            .filter(|name| self.types.contains_key(name))
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of accepted names, aliases included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
