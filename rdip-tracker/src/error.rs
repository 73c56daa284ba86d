//! Session error types

use rdip_core::ValidationError;
use thiserror::Error;

/// Message used when the service reports a failure without saying why
pub const DEFAULT_JOB_ERROR: &str = "Unknown error";

/// Terminal failures of an analysis session
///
/// Transient status-fetch failures never appear here on their own: the poller
/// absorbs them until the attempt ceiling, then reports [`TrackError::ConnectionLost`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// Rejected locally; no request was sent
    #[error("{0}")]
    SubmissionRejected(#[from] ValidationError),

    /// The service refused the submission
    #[error("{0}")]
    SubmissionFailed(String),

    /// The service reported the job as failed
    #[error("{0}")]
    JobFailed(String),

    /// The service kept answering but the job never finished
    #[error("Timed out: the analysis took too long ({attempts} status checks)")]
    TimedOut { attempts: u32 },

    /// Status checks kept failing
    #[error("Lost connection to the analysis service ({attempts} status checks)")]
    ConnectionLost { attempts: u32 },

    /// A newer submission or an explicit cancel took over the session
    #[error("Session was superseded or cancelled")]
    Superseded,
}

impl TrackError {
    /// Whether the error ends a session that had reached the service
    pub fn is_terminal_failure(&self) -> bool {
        !matches!(self, TrackError::SubmissionRejected(_) | TrackError::Superseded)
    }
}
