//! Request submitter
//!
//! Sends one analysis request and decides whether the answer is already final
//! or a job that has to be watched.

use rdip_core::ValidationError;
use rdip_core::domain::job::{AnalysisResult, JobOutcome};
use rdip_core::dto::analyze::AnalyzeRequest;
use tracing::{info, warn};

use crate::api::AnalysisApi;
use crate::error::TrackError;

/// What the service answered to a submission
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Finished on the spot (typically a cache hit); nothing to poll
    Resolved {
        job_id: String,
        result: AnalysisResult,
    },
    /// Accepted; poll `job_id` until it finishes
    Pending { job_id: String },
}

impl Submission {
    pub fn job_id(&self) -> &str {
        match self {
            Submission::Resolved { job_id, .. } | Submission::Pending { job_id } => job_id,
        }
    }
}

/// Check a request before it costs a network call
pub fn validate(request: &AnalyzeRequest) -> Result<(), TrackError> {
    if request.url.trim().is_empty() {
        return Err(ValidationError::EmptyTarget.into());
    }
    Ok(())
}

/// Submit `request` and classify the answer
pub async fn submit(api: &dyn AnalysisApi, request: &AnalyzeRequest) -> Result<Submission, TrackError> {
    validate(request)?;

    let job = api.submit_analysis(request).await.map_err(|e| {
        warn!(target_url = %request.url, error = %e, "Submission failed");
        TrackError::SubmissionFailed(e.user_message())
    })?;

    match job.outcome() {
        JobOutcome::Completed(result) => {
            info!(job_id = %job.id, cached = job.is_cached(), "Submission resolved immediately");
            Ok(Submission::Resolved {
                job_id: job.id,
                result,
            })
        }
        _ => {
            info!(job_id = %job.id, status = %job.status, "Submission accepted");
            Ok(Submission::Pending { job_id: job.id })
        }
    }
}
