//! driftwatch CLI
//!
//! Command-line interface for EC2 configuration drift detection

use clap::{Parser, Subcommand, ValueEnum};
use driftwatch_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "driftwatch")]
#[command(about = "driftwatch - Detect configuration drift between observed and declared EC2 state", long_about = None)]
struct Cli {
    /// Log line format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare every observed instance against declared state
    Scan(commands::scan::ScanArgs),
    /// Compare a single instance
    Check(commands::check::CheckArgs),
    /// List the attribute paths that would be compared
    Attributes(commands::attributes::AttributesArgs),
}

fn profile(format: LogFormat, verbose: bool) -> Profile {
    match (format, verbose) {
        (LogFormat::Json, _) => Profile::Production,
        (LogFormat::Text, true) => Profile::Development,
        (LogFormat::Text, false) => Profile::Cli,
    }
}

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging_facility::init(profile(cli.log_format, cli.verbose));

    let result = match cli.command {
        Commands::Scan(args) => commands::scan::execute(args).await,
        Commands::Check(args) => commands::check::execute(args).await,
        Commands::Attributes(args) => commands::attributes::execute(args),
    };

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
