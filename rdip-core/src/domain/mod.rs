//! Core domain types
//!
//! This module contains the structures the client observes from the analysis service.
//! The client never mutates a job locally: every `Job` value is a snapshot taken from
//! a service response.

pub mod health;
pub mod job;
pub mod progress;
