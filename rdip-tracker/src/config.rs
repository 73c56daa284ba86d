//! Tracker configuration
//!
//! The service location comes from the environment. Polling cadence is fixed.

use std::time::Duration;

/// Delay between two status checks of the same job
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Pending status checks allowed before a watch gives up
pub const MAX_POLL_ATTEMPTS: u32 = 300;

/// Service URL used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Analysis service base URL (e.g., "http://localhost:8000")
    pub api_url: String,
}

impl Config {
    /// Creates a new configuration
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - RDIP_API_URL (optional)
    /// - API_URL (optional, read when RDIP_API_URL is unset)
    ///
    /// Falls back to [`DEFAULT_API_URL`].
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::from_lookup(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = ["RDIP_API_URL", "API_URL"]
            .into_iter()
            .filter_map(&lookup)
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self { api_url }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
