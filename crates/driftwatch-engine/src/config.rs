//! Configuration layer
//!
//! A `driftwatch.toml` file looks like:
//!
//! ```toml
//! attributes = ["instance_type", "tags"]
//! concurrency = 8
//! output = "table"
//! timeout_secs = 30
//! ```
//!
//! Every key is optional. CLI flags override file values, which override
//! the defaults here.

use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use driftwatch_core::{OutputFormat, DEFAULT_ATTRIBUTES};
use serde::{Deserialize, Serialize};

use crate::errors::{config_invalid, Result};

/// Jobs allowed in flight per available CPU when no cap is configured
pub const CONCURRENCY_PER_CPU: usize = 4;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default concurrency cap: available parallelism times [`CONCURRENCY_PER_CPU`]
pub fn default_concurrency() -> NonZeroUsize {
    let cpus = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    NonZeroUsize::new(cpus.saturating_mul(CONCURRENCY_PER_CPU)).unwrap_or(NonZeroUsize::MIN)
}

/// Coerce a requested cap to a positive value; zero or negative selects the default
pub fn resolve_concurrency(requested: i64) -> NonZeroUsize {
    usize::try_from(requested)
        .ok()
        .and_then(NonZeroUsize::new)
        .unwrap_or_else(default_concurrency)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriftConfig {
    /// Attribute paths to compare; empty selects the default set
    pub attributes: Vec<String>,
    /// Concurrency cap; zero or negative selects [`default_concurrency`]
    pub concurrency: i64,
    pub output: OutputFormat,
    /// Batch deadline in seconds; zero disables it
    pub timeout_secs: u64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            attributes: DEFAULT_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
            concurrency: 0,
            output: OutputFormat::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DriftConfig {
    /// Read a TOML config file
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the file cannot be read, is not valid TOML, or
    /// has unknown keys or mistyped values.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_invalid("load_config", format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse TOML config text
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML, unknown keys or mistyped values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| config_invalid("parse_config", e.to_string()))
    }

    pub fn resolved_concurrency(&self) -> NonZeroUsize {
        resolve_concurrency(self.concurrency)
    }

    /// Batch deadline, if any
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftwatch_core::DwErrorKind;

    #[test]
    fn test_defaults() {
        let config = DriftConfig::default();
        assert_eq!(config.attributes.len(), DEFAULT_ATTRIBUTES.len());
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.resolved_concurrency(), default_concurrency());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = DriftConfig::from_toml_str("concurrency = 8\noutput = \"table\"\n").unwrap();
        assert_eq!(config.resolved_concurrency().get(), 8);
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.attributes.len(), DEFAULT_ATTRIBUTES.len());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = DriftConfig::from_toml_str("concurency = 8\n").unwrap_err();
        assert_eq!(err.kind(), DwErrorKind::InvalidConfig);
    }

    #[test]
    fn test_bad_output_rejected() {
        assert!(DriftConfig::from_toml_str("output = \"yaml\"\n").is_err());
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = DriftConfig::from_toml_str("timeout_secs = 0\n").unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_non_positive_concurrency_uses_default() {
        assert_eq!(resolve_concurrency(0), default_concurrency());
        assert_eq!(resolve_concurrency(-5), default_concurrency());
        assert_eq!(resolve_concurrency(3).get(), 3);
        assert!(default_concurrency().get() >= CONCURRENCY_PER_CPU);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("driftwatch.toml");
        std::fs::write(&path, "attributes = [\"ami\"]\n").unwrap();

        let config = DriftConfig::load(&path).unwrap();
        assert_eq!(config.attributes, vec!["ami"]);

        let err = DriftConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert_eq!(err.kind(), DwErrorKind::InvalidConfig);
    }
}
