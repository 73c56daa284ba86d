//! Service seam used by the tracker
//!
//! The submitter, poller and health monitor talk to the service through this
//! trait so they can be driven by a scripted implementation in tests.

use async_trait::async_trait;
use rdip_client::{HealthResponse, Result, ServiceClient};
use rdip_core::domain::job::Job;
use rdip_core::dto::analyze::AnalyzeRequest;

/// Remote calls the tracker needs
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// `POST /v1/analyze`
    async fn submit_analysis(&self, request: &AnalyzeRequest) -> Result<Job>;

    /// `GET /v1/status/{job_id}`
    async fn job_status(&self, job_id: &str) -> Result<Job>;

    /// `GET /v1/health`
    async fn health(&self) -> Result<HealthResponse>;
}

#[async_trait]
impl AnalysisApi for ServiceClient {
    async fn submit_analysis(&self, request: &AnalyzeRequest) -> Result<Job> {
        ServiceClient::submit_analysis(self, request).await
    }

    async fn job_status(&self, job_id: &str) -> Result<Job> {
        ServiceClient::job_status(self, job_id).await
    }

    async fn health(&self) -> Result<HealthResponse> {
        ServiceClient::health(self).await
    }
}
