//! RDIP Core
//!
//! Core types and abstractions for the Reddit Deep Intelligence Platform client.
//!
//! This crate contains:
//! - Domain types: Jobs as reported by the analysis service, health states, the progress table
//! - DTOs: Request bodies and query parameters sent to the service, with local validation

pub mod domain;
pub mod dto;
pub mod error;

pub use error::ValidationError;
