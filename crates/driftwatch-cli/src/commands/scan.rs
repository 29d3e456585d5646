//! Scan command
//!
//! Usage: driftwatch scan --actual <FILE> --desired <FILE> [--instances a,b] [--output FMT]

use clap::Args;
use driftwatch_core::{render_report, OutputFormat};
use driftwatch_engine::{DriftService, ExecutionContext};

use super::{print_rendered, ConfigArgs, Outcome, SourceArgs};

#[derive(Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Only evaluate these instance IDs, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub instances: Vec<String>,

    /// Maximum concurrent evaluations (0 or less selects the default)
    #[arg(long, allow_negative_numbers = true)]
    pub concurrency: Option<i64>,

    /// Report format: text, json, table, compact
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Cancel outstanding evaluations after this many seconds (0 disables)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Exit with status 2 when any drift is detected
    #[arg(long)]
    pub fail_on_drift: bool,
}

/// Execute scan command
pub async fn execute(args: ScanArgs) -> anyhow::Result<Outcome> {
    let mut config = args.config.load()?;
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(format) = args.output {
        config.output = format;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    let format: OutputFormat = config.output;
    let deadline = config.timeout();
    let service = DriftService::new(config);

    let ctx = ExecutionContext::new();
    let timer = deadline.map(|d| ctx.cancel_after(d));

    let (actual, desired) = args.sources.open();
    let scanned = service.scan(&ctx, &actual, &desired, &args.instances).await;

    if let Some(timer) = timer {
        timer.abort();
    }
    let report = scanned?;

    print_rendered(&render_report(&report, format), format);

    if args.fail_on_drift && report.has_drift() {
        Ok(Outcome::DriftDetected)
    } else {
        Ok(Outcome::Success)
    }
}
