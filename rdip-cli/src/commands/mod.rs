//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod analyze;
mod health;
mod status;
mod trending;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use rdip_core::domain::job::JobStatus;
use rdip_core::dto::trending::{DEFAULT_LIMIT, TrendingPeriod};
use rdip_tracker::Config;
use std::path::PathBuf;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a Reddit thread and wait for the result
    Analyze {
        /// Reddit thread URL
        url: String,

        /// Ignore the service cache and analyze again
        #[arg(long)]
        force_refresh: bool,

        /// Expand more comments (slower)
        #[arg(long)]
        deep_scan: bool,

        /// Limit content size to stay within model token limits
        #[arg(long)]
        lite: bool,

        /// Write the result JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the current status of a job
    Status {
        /// Job ID returned by the service
        job_id: String,
    },
    /// Trending topics of a subreddit
    Trending {
        /// Subreddit name, with or without the r/ prefix
        subreddit: String,

        /// Time window
        #[arg(short, long, default_value_t = TrendingPeriod::Week)]
        period: TrendingPeriod,

        /// Number of posts to analyze (1-25)
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Check that the service is reachable
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Analyze {
            url,
            force_refresh,
            deep_scan,
            lite,
            output,
        } => {
            let options = rdip_core::dto::analyze::AnalyzeOptions {
                force_refresh,
                deep_scan,
                lite_mode: lite,
            };
            analyze::handle_analyze(config, &url, options, output).await
        }
        Commands::Status { job_id } => status::handle_status(config, &job_id).await,
        Commands::Trending {
            subreddit,
            period,
            limit,
        } => trending::handle_trending(config, &subreddit, period, limit).await,
        Commands::Health => health::handle_health(config).await,
    }
}

/// Colorize job status for display
fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Queued => status_str.yellow(),
        JobStatus::Processing => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Failed => status_str.red(),
    }
}

/// Pretty-print JSON, falling back to debug output
fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{}", pretty),
        Err(_) => println!("{:?}", value),
    }
}
