//! Report rendering
//!
//! Turns a [`DriftReport`](crate::model::DriftReport) into text for a
//! terminal or a pipeline. Rendering is pure; writing the string out is
//! the caller's business.

pub mod report_render;

pub use report_render::{render_report, render_single};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DriftError;

/// Output format for rendered reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sectioned, human-readable report with per-attribute values
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// Aligned columns, one row per instance
    Table,
    /// Single-line summary
    Compact,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Table,
        OutputFormat::Compact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
            OutputFormat::Compact => "compact",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                DriftError::InvalidConfig {
                    reason: format!(
                        "unknown output format '{}' (expected one of: {})",
                        s,
                        valid.join(", ")
                    ),
                }
            })
    }
}
