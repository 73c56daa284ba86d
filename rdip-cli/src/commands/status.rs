//! Status command handler

use anyhow::Result;
use colored::*;
use rdip_client::ServiceClient;
use rdip_core::domain::job::Job;
use rdip_core::domain::progress::label_for;
use rdip_tracker::Config;

use super::{colorize_status, print_json};

/// Fetch a job once and display it
pub async fn handle_status(config: &Config, job_id: &str) -> Result<()> {
    let client = ServiceClient::new(&config.api_url);

    match client.job_status(job_id).await {
        Ok(job) => {
            print_job_details(&job);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("{}", format!("Job {} not found.", job_id).yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print detailed job information
fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", job.id.cyan());
    println!("  Status:    {}", colorize_status(job.status));

    if !job.status.is_terminal() {
        println!("  Progress:  {}% {}", job.progress, label_for(job.progress).dimmed());
    }

    if let Some(created) = job.created_at {
        println!("  Created:   {}", created.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(error) = &job.error {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }

    if let Some(result) = &job.result {
        println!("\n{}", "Result:".bold());
        print_json(result);
    }
}
