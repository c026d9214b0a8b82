// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! structview-dump - inspect schema layouts and raw records
//!
//! Compiles a schema document, prints the resulting layouts and projects
//! raw record files into named-field objects.

mod render;
mod values;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use structview::config::DEFAULT_SCHEMA_FILE;
use structview::{
    LayoutCache, ProjectorConfig, RecordProjector, RecordWriter, SchemaCompiler, SchemaDocument,
    TypeRegistry,
};

#[derive(Parser, Debug)]
#[command(name = "structview-dump")]
#[command(about = "Inspect schema layouts and project raw native records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print compiled layouts
    Layout {
        /// Schema document
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SCHEMA_FILE)]
        schema: PathBuf,

        /// Only this record
        #[arg(short, long)]
        record: Option<String>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Project a raw record file
    Project {
        /// Schema document
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SCHEMA_FILE)]
        schema: PathBuf,

        /// Record name
        #[arg(short, long)]
        record: String,

        /// Raw record bytes
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Reject inputs whose length differs from the record size
        #[arg(long)]
        strict: bool,
    },

    /// Write a raw record from JSON field values
    Encode {
        /// Schema document
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SCHEMA_FILE)]
        schema: PathBuf,

        /// Record name
        #[arg(short, long)]
        record: String,

        /// Field values, e.g. '{"x": 42, "y": 1.5}'; omitted fields are written as zero
        #[arg(long, value_name = "JSON")]
        values: String,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Write and project the built-in MyStruct record
    Demo,
}

fn main() {
    // RUST_LOG=debug shows compiler and cache activity
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Layout {
            schema,
            record,
            json,
        } => cmd_layout(&schema, record.as_deref(), json),
        Commands::Project {
            schema,
            record,
            input,
            json,
            strict,
        } => cmd_project(&schema, &record, &input, json, strict),
        Commands::Encode {
            schema,
            record,
            values,
            output,
        } => cmd_encode(&schema, &record, &values, &output),
        Commands::Demo => cmd_demo(),
    }
}

fn load_cache(schema: &Path) -> Result<LayoutCache> {
    let doc = SchemaDocument::from_path(schema)?;
    let cache = LayoutCache::new();
    SchemaCompiler::new(TypeRegistry::global())
        .compile_into(&doc, &cache)
        .with_context(|| format!("compiling {}", schema.display()))?;
    Ok(cache)
}

fn cmd_layout(schema: &Path, record: Option<&str>, json: bool) -> Result<()> {
    let cache = load_cache(schema)?;
    let names = match record {
        Some(name) => {
            anyhow::ensure!(cache.contains(name), "record '{}' not in {}", name, schema.display());
            vec![name.to_string()]
        }
        None => cache.names(),
    };

    let layouts = names
        .iter()
        .filter_map(|name| cache.get(name))
        .collect::<Vec<_>>();

    if json {
        let refs: Vec<_> = layouts.iter().map(|l| l.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&refs)?);
    } else {
        for layout in &layouts {
            render::print_layout(layout);
        }
    }
    Ok(())
}

fn cmd_project(schema: &Path, record: &str, input: &Path, json: bool, strict: bool) -> Result<()> {
    let cache = load_cache(schema)?;
    let bytes =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let config = ProjectorConfig::default()
        .with_strict_size(strict)
        .with_trace_projection(true);
    let obj = RecordProjector::with_config(&cache, config)
        .project(record, &bytes)
        .with_context(|| format!("projecting {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        render::print_object(record, &obj);
    }
    Ok(())
}

/// Fields absent from `values` keep the writer's zero fill.
fn cmd_encode(schema: &Path, record: &str, values: &str, output: &Path) -> Result<()> {
    let cache = load_cache(schema)?;
    let layout = cache
        .get(record)
        .with_context(|| format!("record '{}' not in {}", record, schema.display()))?;

    let assignments = values::parse_assignments(values)?;
    let mut writer = RecordWriter::new(&layout);
    for (name, value) in assignments {
        writer
            .set(&name, value)
            .with_context(|| format!("field '{}'", name))?;
    }
    let bytes = writer.finish();

    std::fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "{} {} byte(s) of '{}' to {}",
        "Wrote".green().bold(),
        bytes.len(),
        record,
        output.display()
    );
    Ok(())
}

#[allow(clippy::approx_constant)]
fn cmd_demo() -> Result<()> {
    let doc = SchemaDocument::new(vec![structview::RecordDecl::new("MyStruct")
        .field("name", "i32")
        .field("score", "float")]);
    let cache = LayoutCache::new();
    SchemaCompiler::new(TypeRegistry::global()).compile_into(&doc, &cache)?;

    let layout = cache
        .get("MyStruct")
        .context("demo layout missing after compile")?;
    let mut writer = RecordWriter::new(&layout);
    writer.set("name", 42i32.into())?;
    writer.set("score", 3.14f32.into())?;
    let bytes = writer.finish();

    render::print_layout(&layout);
    let obj = RecordProjector::new(&cache).project("MyStruct", &bytes)?;
    render::print_object("MyStruct", &obj);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCHEMA: &str = r#"[{"name":"Point","fields":[{"name":"x","type":"i32"},{"name":"y","type":"float"}]}]"#;

    #[test]
    fn test_encode_then_project() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("structs.json");
        std::fs::File::create(&schema)
            .unwrap()
            .write_all(SCHEMA.as_bytes())
            .unwrap();
        let output = dir.path().join("point.bin");

        cmd_encode(&schema, "Point", r#"{"x": -3, "y": 2.5}"#, &output).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), 8);

        let cache = load_cache(&schema).unwrap();
        let obj = RecordProjector::new(&cache).project("Point", &bytes).unwrap();
        assert_eq!(obj.to_string(), "{ x: -3, y: 2.5 }");
    }

    #[test]
    fn test_encode_unknown_field_fails() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("structs.json");
        std::fs::write(&schema, SCHEMA).unwrap();
        let output = dir.path().join("point.bin");

        let err = cmd_encode(&schema, "Point", r#"{"z": 1}"#, &output).unwrap_err();
        assert!(format!("{:#}", err).contains("record 'Point' has no field 'z'"));
        assert!(!output.exists());
    }

    #[test]
    fn test_encode_omitted_fields_are_zero() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("structs.json");
        std::fs::write(&schema, SCHEMA).unwrap();
        let output = dir.path().join("point.bin");

        cmd_encode(&schema, "Point", r#"{"y": 0.5}"#, &output).unwrap();
        let bytes = std::fs::read(&output).unwrap();

        let cache = load_cache(&schema).unwrap();
        let obj = RecordProjector::new(&cache).project("Point", &bytes).unwrap();
        assert_eq!(obj.to_string(), "{ x: 0, y: 0.5 }");
    }

    #[test]
    fn test_missing_schema_names_path() {
        let err = load_cache(Path::new("/nonexistent/structs.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/structs.json"));
    }
}
