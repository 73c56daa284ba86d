//! Lifecycle controller
//!
//! Owns the single analysis session: `Idle -> Submitting -> Watching -> {Resolved, Failed}`.
//! Starting a new submission cancels whatever was being watched. Every state
//! change and every event delivery happens under one lock after checking that
//! the emitting session is still the active one, so an abandoned job can never
//! leak an observation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rdip_core::domain::job::AnalysisResult;
use rdip_core::domain::progress::label_for;
use rdip_core::dto::analyze::AnalyzeRequest;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::AnalysisApi;
use crate::error::TrackError;
use crate::events::SessionEvent;
use crate::scheduler::StatusPoller;
use crate::submitter::{self, Submission};

/// Identifies one submission for the lifetime of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of the controller state
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Submitting {
        target: String,
    },
    Watching {
        job_id: String,
        progress: u8,
        phase: &'static str,
    },
    Resolved {
        result: AnalysisResult,
    },
    Failed {
        error: String,
    },
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Resolved { .. } | SessionState::Failed { .. })
    }
}

struct ActiveSession {
    id: SessionId,
    cancel: CancellationToken,
}

struct Shared {
    state: SessionState,
    active: Option<ActiveSession>,
}

impl Shared {
    fn is_current(&self, id: SessionId) -> bool {
        self.active.as_ref().is_some_and(|active| active.id == id)
    }

    fn settle(&mut self, state: SessionState) {
        self.state = state;
        self.active = None;
    }
}

/// Consumer side of one session
///
/// Yields progress events and then exactly one terminal event. If the session
/// is superseded the stream ends without a terminal event.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    job_id: String,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Session {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Job id assigned by the service
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Next event, or `None` once the session has ended
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Waits for the terminal event, skipping progress
    pub async fn outcome(mut self) -> Result<AnalysisResult, TrackError> {
        while let Some(event) = self.events.recv().await {
            match event {
                SessionEvent::Progress(_) => continue,
                SessionEvent::Resolved(result) => return Ok(result),
                SessionEvent::Failed(error) => return Err(error),
            }
        }
        Err(TrackError::Superseded)
    }
}

/// Drives submissions and tracks at most one job at a time
pub struct LifecycleController {
    api: Arc<dyn AnalysisApi>,
    shared: Arc<Mutex<Shared>>,
    next_id: AtomicU64,
}

impl LifecycleController {
    pub fn new(api: Arc<dyn AnalysisApi>) -> Self {
        Self {
            api,
            shared: Arc::new(Mutex::new(Shared {
                state: SessionState::Idle,
                active: None,
            })),
            next_id: AtomicU64::new(1),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> SessionState {
        lock(&self.shared).state.clone()
    }

    /// Submit a request, superseding any session in progress
    ///
    /// Local validation failures are returned without touching the current
    /// session. Service rejections settle the session as `Failed` and are
    /// returned as errors. Otherwise the returned [`Session`] delivers the
    /// observations, starting with the immediate result if there is one.
    pub async fn submit(&self, request: AnalyzeRequest) -> Result<Session, TrackError> {
        submitter::validate(&request)?;

        let (id, cancel) = self.begin(&request.url);
        let submitted = submitter::submit(self.api.as_ref(), &request).await;

        let mut shared = lock(&self.shared);
        if !shared.is_current(id) {
            debug!(session = %id, "Submission answer arrived after supersession");
            return Err(TrackError::Superseded);
        }

        let (tx, events) = mpsc::unbounded_channel();
        match submitted {
            Err(error) => {
                info!(session = %id, error = %error, "Session failed at submission");
                shared.settle(SessionState::Failed {
                    error: error.to_string(),
                });
                Err(error)
            }
            Ok(Submission::Resolved { job_id, result }) => {
                info!(session = %id, job_id = %job_id, "Session resolved without polling");
                shared.settle(SessionState::Resolved {
                    result: result.clone(),
                });
                let _ = tx.send(SessionEvent::Resolved(result));
                Ok(Session { id, job_id, events })
            }
            Ok(Submission::Pending { job_id }) => {
                info!(session = %id, job_id = %job_id, "Watching job");
                shared.state = SessionState::Watching {
                    job_id: job_id.clone(),
                    progress: 0,
                    phase: label_for(0),
                };
                drop(shared);

                let poller = StatusPoller::new(Arc::clone(&self.api), job_id.clone(), cancel);
                tokio::spawn(watch(Arc::clone(&self.shared), id, poller, tx));
                Ok(Session { id, job_id, events })
            }
        }
    }

    /// Abandon the active session, if any, and return to `Idle`
    ///
    /// Returns whether there was something to cancel.
    pub fn cancel(&self) -> bool {
        let mut shared = lock(&self.shared);
        match shared.active.take() {
            Some(active) => {
                info!(session = %active.id, "Session cancelled");
                active.cancel.cancel();
                shared.state = SessionState::Idle;
                true
            }
            None => false,
        }
    }

    fn begin(&self, target: &str) -> (SessionId, CancellationToken) {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let cancel = CancellationToken::new();

        let mut shared = lock(&self.shared);
        if let Some(previous) = shared.active.take() {
            info!(session = %previous.id, superseded_by = %id, "Superseding session");
            previous.cancel.cancel();
        }
        shared.active = Some(ActiveSession {
            id,
            cancel: cancel.clone(),
        });
        shared.state = SessionState::Submitting {
            target: target.to_string(),
        };

        (id, cancel)
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        if let Some(active) = lock(&self.shared).active.take() {
            active.cancel.cancel();
        }
    }
}

/// Forward poller observations into the session while it stays current
async fn watch(
    shared: Arc<Mutex<Shared>>,
    id: SessionId,
    mut poller: StatusPoller,
    tx: mpsc::UnboundedSender<SessionEvent>,
) {
    while let Some(event) = poller.next().await {
        let mut guard = lock(&shared);
        if !guard.is_current(id) {
            debug!(session = %id, job_id = %poller.job_id(), "Dropping observation for superseded session");
            return;
        }

        match &event {
            SessionEvent::Progress(update) => {
                guard.state = SessionState::Watching {
                    job_id: update.job_id.clone(),
                    progress: update.progress,
                    phase: update.phase,
                };
            }
            SessionEvent::Resolved(result) => guard.settle(SessionState::Resolved {
                result: result.clone(),
            }),
            SessionEvent::Failed(error) => guard.settle(SessionState::Failed {
                error: error.to_string(),
            }),
        }

        let terminal = event.is_terminal();
        // Receiver gone means the consumer stopped listening; state still advances
        let _ = tx.send(event);
        if terminal {
            return;
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
