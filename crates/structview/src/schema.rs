// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema document model.
//!
//! A schema is a JSON array of record declarations:
//!
//! ```json
//! [
//!   { "name": "Point", "fields": [
//!       { "name": "x", "type": "i32" },
//!       { "name": "y", "type": "float" }
//!   ] }
//! ]
//! ```

use crate::error::SchemaError;
use crate::types::TypeTag;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

/// One `{ name, type }` entry of a record declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl FieldDecl {
    /// Field `name` of schema type `type_name`.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A record declaration: name plus ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

impl RecordDecl {
    /// Record declaration with no fields yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field declaration.
    pub fn field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.fields.push(FieldDecl::new(name, type_name));
        self
    }
}

/// A field whose type name has been resolved to a [`TypeTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub tag: TypeTag,
}

/// Parsed schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDocument {
    pub records: Vec<RecordDecl>,
}

impl SchemaDocument {
    /// Document holding `records` in order.
    pub fn new(records: Vec<RecordDecl>) -> Self {
        Self { records }
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))
    }

    /// Parse a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SchemaError> {
        serde_json::from_reader(reader).map_err(|e| SchemaError::Parse(e.to_string()))
    }

    /// Read and parse a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            SchemaError::Io(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            SchemaError::Parse(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(self).map_err(|e| SchemaError::Serialize(e.to_string()))
    }

    /// Find a declaration by record name (first match).
    pub fn record(&self, name: &str) -> Option<&RecordDecl> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Number of record declarations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are declared.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const POINT_SCHEMA: &str = r#"[
        {"name": "Point", "fields": [
            {"name": "x", "type": "i32"},
            {"name": "y", "type": "float"}
        ]}
    ]"#;

    #[test]
    fn parse_point_schema() {
        let doc = SchemaDocument::from_json_str(POINT_SCHEMA).expect("parse");
        assert_eq!(doc.len(), 1);
        let point = doc.record("Point").expect("Point");
        assert_eq!(point.fields[0], FieldDecl::new("x", "i32"));
        assert_eq!(point.fields[1], FieldDecl::new("y", "float"));
    }

    #[test]
    fn builder_matches_parsed() {
        let built = SchemaDocument::new(vec![RecordDecl::new("Point")
            .field("x", "i32")
            .field("y", "float")]);
        let parsed = SchemaDocument::from_json_str(POINT_SCHEMA).expect("parse");
        assert_eq!(built, parsed);
    }

    #[test]
    fn serialize_uses_type_key() {
        let doc = SchemaDocument::new(vec![RecordDecl::new("A").field("v", "double")]);
        let json = doc.to_json_pretty().expect("json");
        assert!(json.contains("\"type\": \"double\""));
        assert_eq!(SchemaDocument::from_json_str(&json).expect("reparse"), doc);
    }

    #[test]
    fn missing_fields_key_is_parse_error() {
        let err = SchemaDocument::from_json_str(r#"[{"name": "A"}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn object_root_is_parse_error() {
        let err = SchemaDocument::from_json_str(r#"{"name": "A", "fields": []}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn load_from_path() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(POINT_SCHEMA.as_bytes()).expect("write");
        let doc = SchemaDocument::from_path(file.path()).expect("load");
        assert!(doc.record("Point").is_some());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SchemaDocument::from_path(dir.path().join("structs.json")).unwrap_err();
        match err {
            SchemaError::Io(msg) => assert!(msg.contains("structs.json")),
            other => panic!("expected Io, got {:?}", other),
        }
    }
}
