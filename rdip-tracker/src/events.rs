//! Observations delivered to session consumers

use rdip_core::domain::job::{AnalysisResult, JobStatus};

use crate::error::TrackError;

/// One progress observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub job_id: String,
    pub status: JobStatus,
    pub progress: u8,
    pub phase: &'static str,
}

/// Event emitted while watching a job
///
/// A session emits any number of `Progress` events followed by exactly one
/// terminal event, unless it is superseded, in which case it simply ends.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Progress(ProgressUpdate),
    Resolved(AnalysisResult),
    Failed(TrackError),
}

impl SessionEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionEvent::Progress(_))
    }
}
