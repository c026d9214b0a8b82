// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven views over raw native records.
//!
//! Reads records written by native code into memory and turns them into
//! dynamic named-field objects. The shape of each record comes from a
//! schema document read at runtime, so no per-type parsing code is written.
//!
//! # Pipeline
//!
//! ```text
//! schema JSON --> SchemaCompiler (TypeRegistry) --> Layout --> LayoutCache
//!                                                               |
//! (record name, raw bytes) --> RecordProjector -----------------+--> DynamicObject
//! ```
//!
//! - **TypeRegistry**: schema type names to native size/alignment
//! - **SchemaCompiler**: record declarations to offset-resolved [`Layout`]s
//! - **LayoutCache**: compiled layouts, built once and read lock-free
//! - **Projector**: exact-width reads at field offsets, one property per field
//!
//! # Example
//!
//! ```rust
//! use structview::{LayoutCache, RecordProjector, SchemaCompiler, SchemaDocument, TypeRegistry};
//!
//! let doc = SchemaDocument::from_json_str(r#"[
//!     {"name": "Point", "fields": [
//!         {"name": "x", "type": "i32"},
//!         {"name": "y", "type": "float"}
//!     ]}
//! ]"#).unwrap();
//!
//! let cache = LayoutCache::new();
//! SchemaCompiler::new(TypeRegistry::global())
//!     .compile_into(&doc, &cache)
//!     .unwrap();
//!
//! // Bytes as a native writer would lay them out
//! let mut raw = Vec::new();
//! raw.extend_from_slice(&42i32.to_ne_bytes());
//! raw.extend_from_slice(&1.5f32.to_ne_bytes());
//!
//! let obj = RecordProjector::new(&cache).project("Point", &raw).unwrap();
//! assert_eq!(obj.to_string(), "{ x: 42, y: 1.5 }");
//! ```

pub mod buffer;
pub mod cache;
pub mod compiler;
pub mod config;
pub mod error;
pub mod host;
pub mod layout;
pub mod projector;
pub mod schema;
pub mod types;
pub mod value;

pub use buffer::{encode_record, RecordBuffer, RecordWriter};
pub use cache::LayoutCache;
pub use compiler::{CompiledLayouts, SchemaCompiler};
pub use config::ProjectorConfig;
pub use error::{ProjectError, SchemaError};
pub use host::{HostRuntime, NativeHost};
pub use layout::{Layout, LayoutBuilder, ResolvedField};
pub use projector::{
    project_field, project_field_with, project_record, project_record_with, RecordProjector,
};
pub use schema::{FieldDecl, FieldSpec, RecordDecl, SchemaDocument};
pub use types::{TypeDescriptor, TypeRegistry, TypeTag};
pub use value::{DynamicObject, DynamicValue};

#[cfg(test)]
mod tests;
