//! Health monitor
//!
//! Checks the service once per process and publishes the classified state.
//! The monitor is the only writer; readers get a snapshot or a watch receiver.
//! The check is not re-armed.

use std::sync::Arc;

use rdip_core::domain::health::{HealthReport, HealthState};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::AnalysisApi;

/// Read side of the process-wide health state
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    report: watch::Receiver<HealthReport>,
}

impl HealthMonitor {
    /// Spawns the single check and returns the reader
    ///
    /// The state reads [`HealthState::Checking`] until the check resolves.
    pub fn start(api: Arc<dyn AnalysisApi>) -> Self {
        let (tx, rx) = watch::channel(HealthReport::checking());

        tokio::spawn(async move {
            let report = check(api.as_ref()).await;
            // Nobody listening is fine
            let _ = tx.send(report);
        });

        Self { report: rx }
    }

    /// Current state
    pub fn state(&self) -> HealthState {
        self.report.borrow().state
    }

    /// Current report, including the detail text
    pub fn report(&self) -> HealthReport {
        self.report.borrow().clone()
    }

    /// Waits for the check to resolve
    pub async fn settled(&self) -> HealthReport {
        let mut rx = self.report.clone();
        match rx.wait_for(|report| report.state.is_settled()).await {
            Ok(report) => report.clone(),
            // Check task went away without answering
            Err(_) => HealthReport::unreachable("health check did not complete"),
        }
    }

    /// Receiver for presentation code that wants change notifications
    pub fn subscribe(&self) -> watch::Receiver<HealthReport> {
        self.report.clone()
    }
}

/// Run one health check and classify it
pub async fn check(api: &dyn AnalysisApi) -> HealthReport {
    match api.health().await {
        Ok(response) => {
            let report = HealthReport::from_status(response.status);
            info!(state = %report.state, status = response.status, "Health check answered");
            report
        }
        Err(e) => {
            warn!(error = %e, "Health check failed");
            HealthReport::unreachable(e.to_string())
        }
    }
}
