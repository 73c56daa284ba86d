//! Local validation errors

use thiserror::Error;

/// Reasons a request is rejected before it reaches the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The analysis target is empty after trimming
    #[error("Please provide a Reddit URL")]
    EmptyTarget,

    /// The subreddit name is empty or too long
    #[error("Invalid subreddit name: '{0}'")]
    InvalidSubreddit(String),

    /// The trending limit is outside the accepted range
    #[error("Limit must be between {min} and {max}, got {value}")]
    LimitOutOfRange { value: u32, min: u32, max: u32 },

    /// Unknown trending period
    #[error("Unknown period '{0}' (expected day, week or month)")]
    UnknownPeriod(String),
}
