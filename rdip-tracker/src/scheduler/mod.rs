//! Scheduler layer for the tracker
//!
//! This layer paces status checks for a submitted job and turns each answer
//! into an observation. It stops on a terminal answer, on the attempt ceiling,
//! or as soon as its cancellation token fires.

pub mod poller;

pub use poller::StatusPoller;
