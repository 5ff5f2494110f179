//! CLI Adapter.

mod pull_request;

use crate::domain::AppError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wfconf")]
#[command(version)]
#[command(
    about = "Compute CI workflow configuration from GitHub event payloads",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide which pull-request validation tiers to run
    #[clap(visible_alias = "pr")]
    PullRequest(pull_request::PullRequestArgs),
}

/// Entry point for the CLI.
pub fn run() {
    init_logging();
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::PullRequest(args) => pull_request::run_pull_request(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; stdout carries workflow output.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
