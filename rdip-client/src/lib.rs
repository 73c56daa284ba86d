//! RDIP HTTP Client
//!
//! A small, type-safe HTTP client for the Reddit Deep Intelligence analysis service.
//!
//! # Example
//!
//! ```no_run
//! use rdip_client::ServiceClient;
//! use rdip_core::dto::analyze::{AnalyzeOptions, AnalyzeRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ServiceClient::new("http://localhost:8000");
//!
//!     let request = AnalyzeRequest::new(
//!         "https://www.reddit.com/r/rust/comments/abc123",
//!         AnalyzeOptions::default(),
//!     )?;
//!     let job = client.submit_analysis(&request).await?;
//!
//!     println!("Submitted job: {} ({})", job.id, job.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod health;
mod jobs;
mod trending;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use health::HealthResponse;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Timeout for `POST /v1/analyze`
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);
/// Timeout for `GET /v1/status/{job_id}`
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for `GET /v1/health`
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for `GET /v1/trending/{subreddit}`; the service analyzes on demand
pub const TRENDING_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the analysis service API
///
/// Endpoints are grouped by concern:
/// - Analysis jobs (submit, status)
/// - Trending topics
/// - Health check
#[derive(Debug, Clone)]
pub struct ServiceClient {
    /// Base URL of the service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ServiceClient {
    /// Create a new service client
    ///
    /// # Example
    /// ```
    /// use rdip_client::ServiceClient;
    ///
    /// let client = ServiceClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new service client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc. Per-request
    /// timeouts still apply on top of the client's own.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL under the base URL
    ///
    /// Each segment is percent-encoded, so ids containing `/`, `?` or `#`
    /// stay inside their segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses become [`ClientError::ApiError`] carrying the
    /// message found in the body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
