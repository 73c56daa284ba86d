//! RDIP CLI
//!
//! Command-line interface for the Reddit Deep Intelligence analysis service.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, handle_command};
use rdip_tracker::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rdip")]
#[command(about = "Reddit Deep Intelligence CLI", long_about = None)]
struct Cli {
    /// Analysis service URL (falls back to API_URL, then http://localhost:8000)
    #[arg(long, env = "RDIP_API_URL")]
    api_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match cli.api_url {
        Some(url) => {
            let config = Config::new(url);
            config.validate()?;
            config
        }
        None => Config::from_env().context("Invalid service configuration")?,
    };

    tracing::debug!(api_url = %config.api_url, "Loaded configuration");

    handle_command(cli.command, &config).await
}

/// Logs go to stderr so results on stdout stay pipeable
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "rdip=debug,rdip_tracker=debug,rdip_client=debug"
    } else {
        "rdip=warn,rdip_tracker=warn,rdip_client=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
