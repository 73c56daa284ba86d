//! Analyze command handler
//!
//! Submits a thread, follows its progress and prints the result.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use rdip_client::ServiceClient;
use rdip_core::domain::health::HealthState;
use rdip_core::domain::job::AnalysisResult;
use rdip_core::dto::analyze::{AnalyzeOptions, AnalyzeRequest};
use rdip_tracker::{
    AnalysisApi, Config, HealthMonitor, LifecycleController, ProgressUpdate, SessionEvent,
};

use super::print_json;

/// Submit, watch and print
pub async fn handle_analyze(
    config: &Config,
    url: &str,
    options: AnalyzeOptions,
    output: Option<PathBuf>,
) -> Result<()> {
    let request = AnalyzeRequest::new(url, options)?;

    let api: Arc<dyn AnalysisApi> = Arc::new(ServiceClient::new(&config.api_url));
    let health = HealthMonitor::start(Arc::clone(&api));
    let controller = LifecycleController::new(api);

    println!("{}", "Submitting request...".dimmed());
    let mut session = controller.submit(request).await?;
    println!("Job: {}", session.job_id().cyan());

    let health_check = health.settled();
    tokio::pin!(health_check);
    let mut health_reported = false;
    let mut last_shown: Option<(u8, &'static str)> = None;

    let result = loop {
        tokio::select! {
            report = &mut health_check, if !health_reported => {
                health_reported = true;
                if report.state != HealthState::Ok {
                    println!(
                        "{} service health is {} ({})",
                        "⚠".yellow(),
                        report.state.to_string().yellow(),
                        report.detail.dimmed()
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => {
                controller.cancel();
                anyhow::bail!("Cancelled");
            }
            event = session.next_event() => match event {
                Some(SessionEvent::Progress(update)) => {
                    if last_shown != Some((update.progress, update.phase)) {
                        print_progress(&update);
                        last_shown = Some((update.progress, update.phase));
                    }
                }
                Some(SessionEvent::Resolved(result)) => break result,
                Some(SessionEvent::Failed(error)) => return Err(error.into()),
                None => anyhow::bail!("Session ended without a result"),
            }
        }
    };

    println!("{} Analysis completed", "✓".green());
    write_result(&result, output)
}

fn print_progress(update: &ProgressUpdate) {
    println!(
        "[{:>3}%] {} {}",
        update.progress,
        update.phase,
        format!("({})", update.status).dimmed()
    );
}

fn write_result(result: &AnalysisResult, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let json = serde_json::to_string_pretty(result)?;
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write result to {}", path.display()))?;
            println!("Result written to {}", path.display().to_string().cyan());
        }
        None => print_json(result),
    }
    Ok(())
}
