//! Health endpoint

use crate::HEALTH_TIMEOUT;
use crate::ServiceClient;
use crate::error::Result;

/// Outcome of a health request that reached the service
///
/// The body is ignored; only the status matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: u16,
}

impl HealthResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl ServiceClient {
    /// Call `GET /v1/health`
    ///
    /// Any HTTP response is `Ok`, including 503; only transport failures are errors.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.endpoint(&["v1", "health"])?;
        let response = self
            .client
            .get(url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await?;

        Ok(HealthResponse {
            status: response.status().as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_ok() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/health")
            .with_status(200)
            .with_body(r#"{"status": "healthy"}"#)
            .create_async()
            .await;

        let response = ServiceClient::new(server.url()).health().await.unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_health_degraded_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/health")
            .with_status(503)
            .with_body(r#"{"status": "degraded"}"#)
            .create_async()
            .await;

        let response = ServiceClient::new(server.url()).health().await.unwrap();
        assert_eq!(response.status, 503);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_health_unreachable() {
        // Port 1 is reserved and nothing listens there.
        let client = ServiceClient::new("http://127.0.0.1:1");
        let err = client.health().await.unwrap_err();
        assert!(err.is_transport());
    }
}
