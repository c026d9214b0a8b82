// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constants and runtime configuration.
//!
//! - **Static**: compile-time constants (default schema file, field limit)
//! - **Dynamic**: [`ProjectorConfig`] for per-projector behaviour
//!
//! ```
//! use structview::config::ProjectorConfig;
//!
//! let config = ProjectorConfig::default().with_strict_size(true);
//! assert!(config.strict_size);
//! ```

use serde::Deserialize;

/// File name the schema is read from when no path is given.
pub const DEFAULT_SCHEMA_FILE: &str = "structs.json";

/// Upper bound on fields per record declaration; larger ones fail with
/// `SchemaError::TooManyFields`.
pub const MAX_FIELDS_PER_RECORD: usize = 4096;

/// Behaviour switches for [`RecordProjector`](crate::RecordProjector).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Reject buffers longer than the layout size (shorter ones are always rejected).
    pub strict_size: bool,
    /// Emit a debug log line per projected record.
    pub trace_projection: bool,
}

impl ProjectorConfig {
    /// Set [`strict_size`](Self::strict_size).
    pub fn with_strict_size(mut self, strict: bool) -> Self {
        self.strict_size = strict;
        self
    }

    /// Set [`trace_projection`](Self::trace_projection).
    pub fn with_trace_projection(mut self, trace: bool) -> Self {
        self.trace_projection = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient() {
        let config = ProjectorConfig::default();
        assert!(!config.strict_size);
        assert!(!config.trace_projection);
    }

    #[test]
    fn deserialize_partial_config() {
        let config: ProjectorConfig =
            serde_json::from_str(r#"{"strict_size": true}"#).expect("config");
        assert!(config.strict_size);
        assert!(!config.trace_projection);
    }
}
