//! Service health types

use serde::{Deserialize, Serialize};

/// Coarse reachability of the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// No health check has resolved yet
    Checking,
    Ok,
    Degraded,
    Down,
}

impl HealthState {
    /// Classify a health check that received an HTTP response
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            HealthState::Ok
        } else {
            HealthState::Degraded
        }
    }

    /// Whether the health check has resolved
    pub fn is_settled(self) -> bool {
        self != HealthState::Checking
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthState::Checking => "checking",
            HealthState::Ok => "ok",
            HealthState::Degraded => "degraded",
            HealthState::Down => "down",
        };
        f.write_str(s)
    }
}

/// Result of the health check, with the detail shown next to the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub state: HealthState,
    /// "OK", "Status: 503", or the transport error text
    pub detail: String,
}

impl HealthReport {
    pub fn checking() -> Self {
        Self {
            state: HealthState::Checking,
            detail: String::new(),
        }
    }

    pub fn from_status(status: u16) -> Self {
        let state = HealthState::from_status(status);
        let detail = if state == HealthState::Ok {
            "OK".to_string()
        } else {
            format!("Status: {}", status)
        };
        Self { state, detail }
    }

    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            state: HealthState::Down,
            detail: error.into(),
        }
    }
}
