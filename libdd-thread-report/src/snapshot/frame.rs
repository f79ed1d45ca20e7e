// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One call-stack location. Every field is optional: the introspection
/// facility reports whatever debug info it has, and rendering degrades
/// rather than fails when pieces are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default)]
    pub native: bool,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Renders the frame the way the host runtime renders stack locations:
/// `Type.function(File:line)`, with `(Native Method)` for native frames and
/// `(Unknown Source)` when no file is known.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.type_name, &self.function) {
            (Some(type_name), Some(function)) => write!(f, "{type_name}.{function}")?,
            (None, Some(function)) => write!(f, "{function}")?,
            (Some(type_name), None) => write!(f, "{type_name}.unknown")?,
            (None, None) => write!(f, "unknown")?,
        }
        if self.native {
            return write!(f, "(Native Method)");
        }
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "({file}:{line})"),
            (Some(file), None) => write!(f, "({file})"),
            (None, _) => write!(f, "(Unknown Source)"),
        }
    }
}

#[cfg(test)]
impl super::test_utils::TestInstance for Frame {
    fn test_instance(seed: u64) -> Self {
        Self {
            type_name: Some(format!("com.example.Worker{seed}")),
            function: Some("run".to_string()),
            file: Some(format!("Worker{seed}.java")),
            line: Some((10 * seed + 1) as u32),
            native: false,
        }
    }
}
