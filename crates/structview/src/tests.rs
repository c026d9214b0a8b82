// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Workflow tests across registry, compiler, cache and projector.

use super::*;
use std::convert::Infallible;

const DEMO_SCHEMA: &str = r#"[
    {"name": "MyStruct", "fields": [
        {"name": "name", "type": "i32"},
        {"name": "score", "type": "float"}
    ]},
    {"name": "Sample", "fields": [
        {"name": "ok", "type": "bool"},
        {"name": "when", "type": "i64"},
        {"name": "level", "type": "u16"},
        {"name": "ratio", "type": "double"}
    ]}
]"#;

/// Host that records every call it receives.
#[derive(Default)]
struct RecordingHost {
    objects: usize,
    values: usize,
    properties: Vec<String>,
}

impl HostRuntime for RecordingHost {
    type Value = String;
    type Object = Vec<(String, String)>;
    type Error = Infallible;

    fn create_bool(&mut self, value: bool) -> Result<String, Infallible> {
        self.values += 1;
        Ok(format!("bool:{}", value))
    }

    fn create_int32(&mut self, value: i32) -> Result<String, Infallible> {
        self.values += 1;
        Ok(format!("int32:{}", value))
    }

    fn create_uint32(&mut self, value: u32) -> Result<String, Infallible> {
        self.values += 1;
        Ok(format!("uint32:{}", value))
    }

    fn create_int64(&mut self, value: i64) -> Result<String, Infallible> {
        self.values += 1;
        Ok(format!("int64:{}", value))
    }

    fn create_double(&mut self, value: f64) -> Result<String, Infallible> {
        self.values += 1;
        Ok(format!("double:{}", value))
    }

    fn create_object(&mut self, _fields: usize) -> Result<Self::Object, Infallible> {
        self.objects += 1;
        Ok(Vec::new())
    }

    fn set_named_property(
        &mut self,
        object: &mut Self::Object,
        name: &str,
        value: String,
    ) -> Result<(), Infallible> {
        self.properties.push(name.to_string());
        object.push((name.to_string(), value));
        Ok(())
    }
}

/// Host that rejects 64-bit integers.
struct NoBigIntHost;

impl HostRuntime for NoBigIntHost {
    type Value = DynamicValue;
    type Object = DynamicObject;
    type Error = String;

    fn create_bool(&mut self, value: bool) -> Result<DynamicValue, String> {
        Ok(value.into())
    }

    fn create_int32(&mut self, value: i32) -> Result<DynamicValue, String> {
        Ok(value.into())
    }

    fn create_uint32(&mut self, value: u32) -> Result<DynamicValue, String> {
        Ok(value.into())
    }

    fn create_int64(&mut self, _value: i64) -> Result<DynamicValue, String> {
        Err("bigint unsupported".to_string())
    }

    fn create_double(&mut self, value: f64) -> Result<DynamicValue, String> {
        Ok(value.into())
    }

    fn create_object(&mut self, fields: usize) -> Result<DynamicObject, String> {
        Ok(DynamicObject::with_capacity(fields))
    }

    fn set_named_property(
        &mut self,
        object: &mut DynamicObject,
        name: &str,
        value: DynamicValue,
    ) -> Result<(), String> {
        object.set_named_property(name, value);
        Ok(())
    }
}

fn demo_cache() -> LayoutCache {
    let doc = SchemaDocument::from_json_str(DEMO_SCHEMA).expect("schema");
    let cache = LayoutCache::new();
    SchemaCompiler::new(TypeRegistry::global())
        .compile_into(&doc, &cache)
        .expect("compile");
    cache
}

#[test]
#[allow(clippy::approx_constant)]
fn test_full_workflow() {
    let cache = demo_cache();
    let layout = cache.get("MyStruct").expect("MyStruct");

    // 1. Producer writes a record
    let mut writer = RecordWriter::new(&layout);
    writer
        .set("name", 42i32.into())
        .and_then(|w| w.set("score", 3.14f32.into()))
        .expect("write");
    let raw = writer.finish();
    assert_eq!(raw.len(), 8);

    // 2. Project it back
    let obj = RecordProjector::new(&cache)
        .project("MyStruct", &raw)
        .expect("project");
    assert_eq!(obj.get("name").and_then(|v| v.as_i32()), Some(42));
    assert_eq!(
        obj.get("score").and_then(|v| v.as_f64()).map(|v| v as f32),
        Some(3.14f32)
    );

    // 3. Re-encode reproduces the producer's bytes
    assert_eq!(encode_record(&layout, &obj).expect("encode"), raw);
}

#[test]
fn test_host_sees_one_object_and_one_value_per_field() {
    let cache = demo_cache();
    let layout = cache.get("Sample").expect("Sample");

    let mut writer = RecordWriter::new(&layout);
    writer
        .set("ok", true.into())
        .and_then(|w| w.set("when", DynamicValue::Int64(-9_000_000_000)))
        .and_then(|w| w.set("level", DynamicValue::Uint32(65535)))
        .and_then(|w| w.set("ratio", 0.125f64.into()))
        .expect("write");
    let raw = writer.finish();

    let mut host = RecordingHost::default();
    let object = RecordProjector::new(&cache)
        .project_with(&mut host, "Sample", RecordBuffer::new(&raw))
        .expect("project");

    assert_eq!(host.objects, 1);
    assert_eq!(host.values, layout.len());
    assert_eq!(host.properties, vec!["ok", "when", "level", "ratio"]);
    assert_eq!(
        object,
        vec![
            ("ok".to_string(), "bool:true".to_string()),
            ("when".to_string(), "int64:-9000000000".to_string()),
            ("level".to_string(), "uint32:65535".to_string()),
            ("ratio".to_string(), "double:0.125".to_string()),
        ]
    );
}

#[test]
fn test_host_error_aborts_only_that_record() {
    let cache = demo_cache();
    let sample = cache.get("Sample").expect("Sample");
    let raw = vec![0u8; sample.size()];

    let projector = RecordProjector::new(&cache);
    let err = projector
        .project_with(&mut NoBigIntHost, "Sample", RecordBuffer::new(&raw))
        .unwrap_err();
    assert_eq!(err, ProjectError::Host("bigint unsupported".into()));

    // Other records and the cache are unaffected
    let ok = projector
        .project_with(&mut NoBigIntHost, "MyStruct", RecordBuffer::new(&[0u8; 8]))
        .expect("MyStruct");
    assert_eq!(ok.len(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_rejected_document_does_not_touch_cache() {
    let cache = demo_cache();
    let before = cache.names();

    let bad = SchemaDocument::new(vec![
        RecordDecl::new("Fresh").field("a", "i32"),
        RecordDecl::new("Trade").field("price", "decimal128"),
    ]);
    let err = SchemaCompiler::new(TypeRegistry::global())
        .compile_into(&bad, &cache)
        .unwrap_err();
    assert_eq!(err.record(), Some("Trade"));
    assert_eq!(cache.names(), before);
}

#[test]
fn test_json_output_follows_declaration_order() {
    let cache = demo_cache();
    let layout = cache.get("Sample").expect("Sample");
    let raw = vec![0u8; layout.size()];
    let obj = project_record(&layout, &RecordBuffer::new(&raw)).expect("project");
    let json = serde_json::to_string(&obj).expect("json");
    assert_eq!(json, r#"{"ok":false,"when":0,"level":0,"ratio":0.0}"#);
}
