//! Trending topics query DTOs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 25;
pub const DEFAULT_LIMIT: u32 = 10;
const MAX_SUBREDDIT_LEN: usize = 50;

/// Time window for trending analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingPeriod {
    Day,
    #[default]
    Week,
    Month,
}

impl TrendingPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendingPeriod::Day => "day",
            TrendingPeriod::Week => "week",
            TrendingPeriod::Month => "month",
        }
    }
}

impl FromStr for TrendingPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(TrendingPeriod::Day),
            "week" => Ok(TrendingPeriod::Week),
            "month" => Ok(TrendingPeriod::Month),
            other => Err(ValidationError::UnknownPeriod(other.to_string())),
        }
    }
}

impl std::fmt::Display for TrendingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of `GET /v1/trending/{subreddit}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingQuery {
    subreddit: String,
    pub period: TrendingPeriod,
    pub limit: u32,
}

impl TrendingQuery {
    /// Build a query, normalising `r/Rust` to `rust`
    pub fn new(subreddit: &str, period: TrendingPeriod, limit: u32) -> Result<Self, ValidationError> {
        let lowered = subreddit.trim().to_lowercase();
        let name = lowered.strip_prefix("r/").unwrap_or(&lowered);

        if name.is_empty() || name.len() > MAX_SUBREDDIT_LEN {
            return Err(ValidationError::InvalidSubreddit(subreddit.to_string()));
        }

        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::LimitOutOfRange {
                value: limit,
                min: MIN_LIMIT,
                max: MAX_LIMIT,
            });
        }

        Ok(Self {
            subreddit: name.to_string(),
            period,
            limit,
        })
    }

    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }
}
