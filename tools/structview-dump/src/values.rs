// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `--values` parsing for the encode command.

use anyhow::{anyhow, bail, Result};
use serde_json::Value;
use structview::DynamicValue;

/// Parse a JSON object of field assignments, ordered by field name.
pub fn parse_assignments(json: &str) -> Result<Vec<(String, DynamicValue)>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(map) = value else {
        bail!("--values must be a JSON object");
    };
    map.into_iter()
        .map(|(name, v)| {
            let value = to_dynamic(&v)
                .ok_or_else(|| anyhow!("field '{}': unsupported value {}", name, v))?;
            Ok((name, value))
        })
        .collect()
}

fn to_dynamic(value: &Value) -> Option<DynamicValue> {
    match value {
        Value::Bool(b) => Some(DynamicValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(match i32::try_from(i) {
                    Ok(small) => DynamicValue::Int32(small),
                    Err(_) => match u32::try_from(i) {
                        Ok(unsigned) => DynamicValue::Uint32(unsigned),
                        Err(_) => DynamicValue::Int64(i),
                    },
                })
            } else if n.is_u64() {
                // above i64::MAX: no supported field can hold it
                None
            } else {
                n.as_f64().map(DynamicValue::Double)
            }
        }
        _ => None,
    }
}
