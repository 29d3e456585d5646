//! Check command
//!
//! Usage: driftwatch check <INSTANCE_ID> --actual <FILE> --desired <FILE>

use clap::Args;
use driftwatch_core::{render_single, OutputFormat};
use driftwatch_engine::DriftService;

use super::{print_rendered, ConfigArgs, Outcome, SourceArgs};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Instance ID to compare
    pub instance_id: String,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Report format: text, json, table, compact
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Exit with status 2 when the instance has drifted
    #[arg(long)]
    pub fail_on_drift: bool,
}

/// Execute check command
pub async fn execute(args: CheckArgs) -> anyhow::Result<Outcome> {
    let config = args.config.load()?;
    let format = args.output.unwrap_or(config.output);
    let service = DriftService::new(config);

    let (actual, desired) = args.sources.open();
    let result = service.check(&actual, &desired, &args.instance_id).await?;

    print_rendered(&render_single(&result, format), format);

    if args.fail_on_drift && result.has_drift {
        Ok(Outcome::DriftDetected)
    } else {
        Ok(Outcome::Success)
    }
}
