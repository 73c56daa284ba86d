//! Trending command handler

use anyhow::Result;
use colored::*;
use rdip_client::ServiceClient;
use rdip_core::dto::trending::{TrendingPeriod, TrendingQuery};
use rdip_tracker::Config;

use super::print_json;

/// Fetch trending topics once and print them
pub async fn handle_trending(
    config: &Config,
    subreddit: &str,
    period: TrendingPeriod,
    limit: u32,
) -> Result<()> {
    let query = TrendingQuery::new(subreddit, period, limit)?;
    let client = ServiceClient::new(&config.api_url);

    println!(
        "{}",
        format!(
            "Analyzing r/{} ({}, {} posts)...",
            query.subreddit(),
            query.period,
            query.limit
        )
        .dimmed()
    );

    let trending = client.trending(&query).await?;
    print_json(&trending);

    Ok(())
}
