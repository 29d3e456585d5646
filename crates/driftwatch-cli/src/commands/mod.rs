//! Subcommands and the options they share

pub mod attributes;
pub mod check;
pub mod scan;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use driftwatch_core::OutputFormat;
use driftwatch_engine::DriftConfig;
use driftwatch_store::{SnapshotSource, TerraformStateSource};

/// How a command finished when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Drift was found and the caller asked for a failing status
    DriftDetected,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::DriftDetected => 2,
        }
    }
}

/// Where the two sides of the comparison are read from
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Observed-state snapshot (.json, .yaml, .yml)
    #[arg(long, value_name = "FILE")]
    pub actual: PathBuf,

    /// Terraform state file (.tfstate, .json)
    #[arg(long, value_name = "FILE")]
    pub desired: PathBuf,
}

impl SourceArgs {
    pub fn open(&self) -> (SnapshotSource, TerraformStateSource) {
        (
            SnapshotSource::new(&self.actual),
            TerraformStateSource::new(&self.desired),
        )
    }
}

/// Options that override the config file
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Attribute paths to compare, comma-separated (replaces the configured list)
    #[arg(long, value_delimiter = ',')]
    pub attributes: Vec<String>,
}

impl ConfigArgs {
    /// Config file (or defaults) with the attribute override applied
    pub fn load(&self) -> anyhow::Result<DriftConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DriftConfig::default(),
        };
        if !self.attributes.is_empty() {
            config.attributes = self.attributes.clone();
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> anyhow::Result<DriftConfig> {
    DriftConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))
}

pub fn print_rendered(rendered: &str, format: OutputFormat) {
    tracing::debug!(format = %format, bytes = rendered.len(), "writing report");
    print!("{}", rendered);
}
