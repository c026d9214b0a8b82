// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use colored::*;
use structview::{DynamicObject, DynamicValue, Layout};

pub fn print_layout(layout: &Layout) {
    println!(
        "{} {} (size {}, align {}, {} padding byte(s))",
        "record".cyan().bold(),
        layout.record_name().bold(),
        layout.size(),
        layout.align(),
        layout.padding_bytes()
    );
    println!("  {:>6}  {:>4}  {:<8}  name", "offset", "size", "type");
    for field in layout.fields() {
        println!(
            "  {:>6}  {:>4}  {:<8}  {}",
            field.offset,
            field.size,
            field.tag.name().yellow(),
            field.name
        );
    }
}

pub fn print_object(record: &str, obj: &DynamicObject) {
    println!("{} {}", record.bold(), "{");
    for (name, value) in obj.iter() {
        println!("  {}: {} {}", name, value, kind_label(value).dimmed());
    }
    println!("}}");
}

fn kind_label(value: &DynamicValue) -> String {
    format!("({})", value.kind_name())
}
