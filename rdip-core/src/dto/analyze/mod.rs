//! Analysis request DTOs

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Processing options sent with an analysis request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Bypass the service cache and analyze again
    pub force_refresh: bool,
    /// Expand more comments (slower)
    pub deep_scan: bool,
    /// Limit content size to stay within model token limits
    pub lite_mode: bool,
}

/// Body of `POST /v1/analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
    #[serde(flatten)]
    pub options: AnalyzeOptions,
}

impl AnalyzeRequest {
    /// Build a request for `url`, trimming whitespace and trailing slashes
    pub fn new(url: &str, options: AnalyzeOptions) -> Result<Self, ValidationError> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ValidationError::EmptyTarget);
        }

        Ok(Self {
            url: url.to_string(),
            options,
        })
    }
}
