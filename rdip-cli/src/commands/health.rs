//! Health command handler

use std::sync::Arc;

use anyhow::Result;
use colored::*;
use rdip_client::ServiceClient;
use rdip_core::domain::health::HealthState;
use rdip_tracker::{AnalysisApi, Config, HealthMonitor};

/// Run the health check and report it
pub async fn handle_health(config: &Config) -> Result<()> {
    let api: Arc<dyn AnalysisApi> = Arc::new(ServiceClient::new(&config.api_url));
    let report = HealthMonitor::start(api).settled().await;

    let state = report.state.to_string();
    let state = match report.state {
        HealthState::Ok => state.green(),
        HealthState::Degraded => state.yellow(),
        HealthState::Down | HealthState::Checking => state.red(),
    };

    println!("Service: {}", config.api_url.cyan());
    println!("Health:  {} {}", state, report.detail.dimmed());

    if report.state != HealthState::Ok {
        anyhow::bail!("Service is not healthy");
    }

    Ok(())
}
