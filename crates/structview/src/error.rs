// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema compilation and record projection.

use std::fmt;

/// Errors raised while loading or compiling a schema document.
///
/// Any of these aborts the compilation of the whole document; the
/// [`LayoutCache`](crate::LayoutCache) is never left with a partial entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field references a type name the registry does not know.
    UnknownType {
        record: String,
        field: String,
        type_name: String,
    },
    /// The same record name is declared twice in one document.
    DuplicateRecordName(String),
    /// A record declares zero fields.
    EmptyRecord(String),
    /// A record declares the same field name twice.
    DuplicateFieldName { record: String, field: String },
    /// The requested record is not declared in the document.
    UndeclaredRecord(String),
    /// A record declares more fields than allowed.
    TooManyFields {
        record: String,
        count: usize,
        max: usize,
    },
    /// A different layout is already cached under this record name.
    Conflict(String),
    /// The schema document is not valid JSON for the expected shape.
    Parse(String),
    /// The schema document could not be read.
    Io(String),
    /// The schema document could not be written out as JSON.
    Serialize(String),
}

impl SchemaError {
    /// Record name the error refers to, if any.
    pub fn record(&self) -> Option<&str> {
        match self {
            Self::UnknownType { record, .. }
            | Self::TooManyFields { record, .. }
            | Self::DuplicateFieldName { record, .. }
            | Self::UndeclaredRecord(record)
            | Self::DuplicateRecordName(record)
            | Self::EmptyRecord(record)
            | Self::Conflict(record) => Some(record.as_str()),
            Self::Parse(_) | Self::Io(_) | Self::Serialize(_) => None,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType {
                record,
                field,
                type_name,
            } => write!(
                f,
                "unknown type '{}' for field '{}.{}'",
                type_name, record, field
            ),
            Self::DuplicateRecordName(name) => {
                write!(f, "record '{}' is declared more than once", name)
            }
            Self::EmptyRecord(name) => write!(f, "record '{}' declares no fields", name),
            Self::DuplicateFieldName { record, field } => write!(
                f,
                "record '{}' declares field '{}' more than once",
                record, field
            ),
            Self::UndeclaredRecord(name) => {
                write!(f, "record '{}' is not declared in the schema", name)
            }
            Self::TooManyFields { record, count, max } => write!(
                f,
                "record '{}' declares {} fields (maximum {})",
                record, count, max
            ),
            Self::Conflict(name) => write!(
                f,
                "a different layout for record '{}' is already cached",
                name
            ),
            Self::Parse(msg) => write!(f, "schema parse error: {}", msg),
            Self::Io(msg) => write!(f, "schema I/O error: {}", msg),
            Self::Serialize(msg) => write!(f, "schema serialization error: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors raised while projecting or encoding a raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectError {
    /// No layout is cached under this record name.
    UnknownRecord(String),
    /// The buffer does not have the size the layout requires.
    LayoutMismatch {
        record: String,
        need: usize,
        have: usize,
    },
    /// A read or write would fall outside the buffer.
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
    /// A dynamic value does not match the field's type tag.
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },
    /// A dynamic value does not fit the field's native width.
    ValueOutOfRange { field: String, value: String },
    /// An object passed for encoding lacks a field of the layout.
    MissingField(String),
    /// A value was written to a field the layout does not declare.
    UnknownField { record: String, field: String },
    /// The host runtime refused a value or property.
    Host(String),
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRecord(name) => write!(f, "no layout for record '{}'", name),
            Self::LayoutMismatch { record, need, have } => write!(
                f,
                "buffer does not match layout '{}': need {} bytes, have {}",
                record, need, have
            ),
            Self::OutOfBounds { offset, width, len } => write!(
                f,
                "read of {} bytes at offset {} exceeds buffer of {} bytes",
                width, offset, len
            ),
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "type mismatch for field '{}': expected {}, found {}",
                field, expected, found
            ),
            Self::ValueOutOfRange { field, value } => {
                write!(f, "value {} does not fit field '{}'", value, field)
            }
            Self::MissingField(name) => write!(f, "missing field: {}", name),
            Self::UnknownField { record, field } => {
                write!(f, "record '{}' has no field '{}'", record, field)
            }
            Self::Host(msg) => write!(f, "host runtime error: {}", msg),
        }
    }
}

impl std::error::Error for ProjectError {}
