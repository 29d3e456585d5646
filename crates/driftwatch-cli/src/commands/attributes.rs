//! Attributes command
//!
//! Usage: driftwatch attributes [--attributes a,b] [--config FILE] [--supported]

use clap::Args;
use driftwatch_core::supported_attributes;
use driftwatch_engine::DriftService;

use super::{ConfigArgs, Outcome};

#[derive(Debug, Args)]
pub struct AttributesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// List every comparable path instead of the configured ones
    #[arg(long)]
    pub supported: bool,
}

/// Execute attributes command
pub fn execute(args: AttributesArgs) -> anyhow::Result<Outcome> {
    let paths = if args.supported {
        supported_attributes()
    } else {
        DriftService::new(args.config.load()?).list_configured_attributes()
    };

    for path in paths {
        println!("{}", path);
    }
    Ok(Outcome::Success)
}
