//! Status poller
//!
//! Polls the service for one job's status and yields observations lazily.
//! Ticks are strictly sequential: the next check is scheduled only after the
//! previous round-trip has finished.

use std::sync::Arc;

use rdip_core::domain::job::JobOutcome;
use rdip_core::domain::progress::label_for;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::AnalysisApi;
use crate::config::{MAX_POLL_ATTEMPTS, POLL_INTERVAL};
use crate::error::{DEFAULT_JOB_ERROR, TrackError};
use crate::events::{ProgressUpdate, SessionEvent};

/// Watches a single job until it finishes, fails, or runs out of attempts
pub struct StatusPoller {
    api: Arc<dyn AnalysisApi>,
    job_id: String,
    cancel: CancellationToken,
    /// Non-terminal ticks so far, pending answers and failed fetches alike
    attempts: u32,
    started: bool,
    /// Terminal event queued behind the progress event of the same tick
    queued: Option<SessionEvent>,
    finished: bool,
}

impl StatusPoller {
    /// Creates a poller for `job_id`; the first check happens on the first call to `next`
    pub fn new(api: Arc<dyn AnalysisApi>, job_id: impl Into<String>, cancel: CancellationToken) -> Self {
        Self {
            api,
            job_id: job_id.into(),
            cancel,
            attempts: 0,
            started: false,
            queued: None,
            finished: false,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Next observation, or `None` once finished or cancelled
    pub async fn next(&mut self) -> Option<SessionEvent> {
        if self.finished || self.cancel.is_cancelled() {
            return None;
        }

        if let Some(event) = self.queued.take() {
            self.finished = true;
            return Some(event);
        }

        loop {
            if self.started {
                tokio::select! {
                    _ = self.cancel.cancelled() => {
                        debug!(job_id = %self.job_id, "Watch cancelled between ticks");
                        return None;
                    }
                    _ = time::sleep(POLL_INTERVAL) => {}
                }
            }
            self.started = true;

            let fetched = self.api.job_status(&self.job_id).await;

            // The answer may belong to a session that has been superseded meanwhile
            if self.cancel.is_cancelled() {
                debug!(job_id = %self.job_id, "Discarding stale status response");
                return None;
            }

            let job = match fetched {
                Ok(job) => job,
                Err(e) => {
                    self.attempts += 1;
                    warn!(
                        job_id = %self.job_id,
                        attempt = self.attempts,
                        error = %e,
                        "Status check failed"
                    );
                    if self.attempts > MAX_POLL_ATTEMPTS {
                        return Some(self.finish(TrackError::ConnectionLost {
                            attempts: self.attempts,
                        }));
                    }
                    continue;
                }
            };

            return Some(match job.outcome() {
                JobOutcome::Completed(result) => {
                    info!(job_id = %self.job_id, "Job completed");
                    self.finished = true;
                    SessionEvent::Resolved(result)
                }
                JobOutcome::Failed(message) => {
                    let message = message.unwrap_or_else(|| DEFAULT_JOB_ERROR.to_string());
                    self.finish(TrackError::JobFailed(message))
                }
                JobOutcome::MissingResult => {
                    self.finish(TrackError::JobFailed("Job completed without a result".to_string()))
                }
                JobOutcome::Pending { status, progress } => {
                    self.attempts += 1;
                    debug!(
                        job_id = %self.job_id,
                        attempt = self.attempts,
                        %status,
                        progress,
                        "Job still running"
                    );
                    if self.attempts > MAX_POLL_ATTEMPTS {
                        self.queued = Some(SessionEvent::Failed(TrackError::TimedOut {
                            attempts: self.attempts,
                        }));
                    }
                    SessionEvent::Progress(ProgressUpdate {
                        job_id: self.job_id.clone(),
                        status,
                        progress,
                        phase: label_for(progress),
                    })
                }
            });
        }
    }

    fn finish(&mut self, error: TrackError) -> SessionEvent {
        warn!(job_id = %self.job_id, error = %error, "Watch failed");
        self.finished = true;
        SessionEvent::Failed(error)
    }
}
