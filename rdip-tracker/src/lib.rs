//! RDIP Tracker
//!
//! Submits analysis requests to the service and watches them to completion.
//!
//! Architecture:
//! - Configuration: service URL from the environment, fixed polling constants
//! - Api: the `AnalysisApi` seam over the HTTP client
//! - Submitter: one network call, resolved immediately or handed off for watching
//! - Scheduler: the status poller, one tick per second, bounded by attempt count
//! - Controller: the session state machine; owns the single active job
//! - Health: a one-shot reachability check published to readers
//!
//! Everything runs on the tokio runtime. Cancellation is cooperative through
//! `CancellationToken`s owned by the controller.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod health;
pub mod scheduler;
pub mod submitter;

#[cfg(test)]
pub(crate) mod fake;

pub use api::AnalysisApi;
pub use config::{Config, MAX_POLL_ATTEMPTS, POLL_INTERVAL};
pub use controller::{LifecycleController, Session, SessionId, SessionState};
pub use error::TrackError;
pub use events::{ProgressUpdate, SessionEvent};
pub use health::HealthMonitor;
pub use scheduler::StatusPoller;
pub use submitter::Submission;
