//! Analysis job endpoints

use crate::ServiceClient;
use crate::error::Result;
use crate::{STATUS_TIMEOUT, SUBMIT_TIMEOUT};
use rdip_core::domain::job::Job;
use rdip_core::dto::analyze::AnalyzeRequest;
use tracing::debug;

impl ServiceClient {
    // =============================================================================
    // Analysis Jobs
    // =============================================================================

    /// Submit a thread for analysis
    ///
    /// The returned job may already be `completed` when the service answers
    /// from its cache; otherwise it is a handle to poll with [`Self::job_status`].
    pub async fn submit_analysis(&self, req: &AnalyzeRequest) -> Result<Job> {
        let url = self.endpoint(&["v1", "analyze"])?;
        debug!(target_url = %req.url, "Submitting analysis request");

        let response = self
            .client
            .post(url)
            .timeout(SUBMIT_TIMEOUT)
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current status of a job
    ///
    /// # Arguments
    /// * `job_id` - The id returned by [`Self::submit_analysis`]
    pub async fn job_status(&self, job_id: &str) -> Result<Job> {
        let url = self.endpoint(&["v1", "status", job_id])?;
        let response = self
            .client
            .get(url)
            .timeout(STATUS_TIMEOUT)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use mockito::Matcher;
    use rdip_core::domain::job::JobStatus;
    use rdip_core::dto::analyze::AnalyzeOptions;
    use serde_json::json;

    fn request() -> AnalyzeRequest {
        AnalyzeRequest::new(
            "https://www.reddit.com/r/rust/comments/abc123",
            AnalyzeOptions {
                force_refresh: true,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_returns_pending_job() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/analyze")
            .match_body(Matcher::Json(json!({
                "url": "https://www.reddit.com/r/rust/comments/abc123",
                "force_refresh": true,
                "deep_scan": false,
                "lite_mode": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"job_id": "j-1", "status": "queued", "progress": 0}"#)
            .create_async()
            .await;

        let client = ServiceClient::new(server.url());
        let job = client.submit_analysis(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(job.id, "j-1");
        assert_eq!(job.status, JobStatus::Queued);
    }

    #[tokio::test]
    async fn test_submit_surfaces_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/analyze")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Invalid Reddit URL. Please provide a valid Reddit thread URL."}"#)
            .create_async()
            .await;

        let client = ServiceClient::new(server.url());
        let err = client.submit_analysis(&request()).await.unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("Invalid Reddit URL"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_status_completed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/status/j-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"job_id": "j-1", "status": "completed", "progress": 100, "result": {"consensus": "yes"}}"#,
            )
            .create_async()
            .await;

        let client = ServiceClient::new(server.url());
        let job = client.job_status("j-1").await.unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.into_result(), Some(json!({"consensus": "yes"})));
    }

    #[tokio::test]
    async fn test_status_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/status/missing")
            .with_status(404)
            .with_body(r#"{"detail": "Job not found"}"#)
            .create_async()
            .await;

        let client = ServiceClient::new(server.url());
        let err = client.job_status("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_status_job_id_stays_in_its_segment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/status/a%2Fb%3Fc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"job_id": "a/b?c", "status": "processing", "progress": 20}"#)
            .create_async()
            .await;

        let client = ServiceClient::new(server.url());
        let job = client.job_status("a/b?c").await.unwrap();

        mock.assert_async().await;
        assert_eq!(job.id, "a/b?c");
        assert_eq!(job.progress, 20);
    }

    #[tokio::test]
    async fn test_status_garbage_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/status/j-2")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = ServiceClient::new(server.url());
        let err = client.job_status("j-2").await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }
}
