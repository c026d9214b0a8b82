// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema compiler: record declarations to offset-resolved layouts.
//!
//! Compilation is pure and deterministic. A document either compiles as a
//! whole or fails on its first bad record; only complete documents reach
//! the [`LayoutCache`].
//!
//! ```
//! use structview::{SchemaCompiler, SchemaDocument, TypeRegistry};
//!
//! let doc = SchemaDocument::from_json_str(
//!     r#"[{"name": "Point", "fields": [
//!         {"name": "x", "type": "i32"},
//!         {"name": "y", "type": "float"}]}]"#,
//! ).unwrap();
//!
//! let layouts = SchemaCompiler::new(TypeRegistry::global()).compile(&doc).unwrap();
//! assert_eq!(layouts["Point"].size(), 8);
//! assert_eq!(layouts["Point"].fields()[1].offset, 4);
//! ```

use crate::cache::LayoutCache;
use crate::error::SchemaError;
use crate::layout::Layout;
use crate::schema::{FieldSpec, RecordDecl, SchemaDocument};
use crate::types::TypeRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Compiled layouts keyed by record name.
pub type CompiledLayouts = BTreeMap<String, Arc<Layout>>;

/// Compiles schema documents against a [`TypeRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaCompiler<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> SchemaCompiler<'r> {
    /// Compiler resolving type names through `registry`.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Registry used for type resolution.
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Compile one record declaration.
    ///
    /// Record-shape checks (empty, field limit, duplicate names) are those
    /// of [`Layout::from_specs`].
    pub fn compile_record(&self, decl: &RecordDecl) -> Result<Layout, SchemaError> {
        let mut specs = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            let desc = self
                .registry
                .resolve(&decl.name, &field.name, &field.type_name)?;
            specs.push(FieldSpec {
                name: field.name.clone(),
                tag: desc.tag,
            });
        }

        Layout::from_specs(decl.name.clone(), specs)
    }

    /// Compile every record of `doc`.
    pub fn compile(&self, doc: &SchemaDocument) -> Result<CompiledLayouts, SchemaError> {
        let mut layouts = BTreeMap::new();
        for decl in &doc.records {
            if layouts.contains_key(&decl.name) {
                log::warn!("[compiler] duplicate record '{}'", decl.name);
                return Err(SchemaError::DuplicateRecordName(decl.name.clone()));
            }
            let layout = self.compile_record(decl).map_err(|e| {
                log::warn!("[compiler] rejecting schema: {}", e);
                e
            })?;
            log::debug!(
                "[compiler] '{}': {} field(s), size {}, align {}",
                layout.record_name(),
                layout.len(),
                layout.size(),
                layout.align()
            );
            layouts.insert(decl.name.clone(), Arc::new(layout));
        }
        Ok(layouts)
    }

    /// Compile `doc` and publish all of its layouts to `cache` in one step.
    ///
    /// On any error the cache is left untouched.
    pub fn compile_into(
        &self,
        doc: &SchemaDocument,
        cache: &LayoutCache,
    ) -> Result<CompiledLayouts, SchemaError> {
        let layouts = self.compile(doc)?;
        cache.publish(layouts.values().cloned())?;
        Ok(layouts)
    }

    /// Layout for `name`, compiling only that declaration on first use.
    pub fn layout_for(
        &self,
        doc: &SchemaDocument,
        name: &str,
        cache: &LayoutCache,
    ) -> Result<Arc<Layout>, SchemaError> {
        cache.get_or_try_insert_with(name, || {
            let mut matches = doc.records.iter().filter(|r| r.name == name);
            let decl = matches
                .next()
                .ok_or_else(|| SchemaError::UndeclaredRecord(name.to_string()))?;
            if matches.next().is_some() {
                return Err(SchemaError::DuplicateRecordName(name.to_string()));
            }
            self.compile_record(decl)
        })
    }
}
