//! Progress phase labels
//!
//! Maps a completion percentage to a human-readable phase. The thresholds follow
//! the checkpoints the analysis service reports while it runs its pipeline.

/// One row of the progress table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub threshold: u8,
    pub label: &'static str,
}

/// Label used before the first threshold is reached
pub const DEFAULT_LABEL: &str = "Initializing...";

/// Phase table, sorted ascending by threshold
pub const PROGRESS_TABLE: [Phase; 7] = [
    Phase {
        threshold: 10,
        label: "Fetching thread from Reddit...",
    },
    Phase {
        threshold: 20,
        label: "Extracting comments...",
    },
    Phase {
        threshold: 35,
        label: "Running AI analysis...",
    },
    Phase {
        threshold: 50,
        label: "Summarizing discussion...",
    },
    Phase {
        threshold: 70,
        label: "Analyzing sentiment...",
    },
    Phase {
        threshold: 85,
        label: "Enriching links...",
    },
    Phase {
        threshold: 95,
        label: "Finalizing results...",
    },
];

/// Label of the highest threshold not above `progress`, or [`DEFAULT_LABEL`]
pub fn label_for(progress: u8) -> &'static str {
    PROGRESS_TABLE
        .iter()
        .rev()
        .find(|phase| phase.threshold <= progress)
        .map_or(DEFAULT_LABEL, |phase| phase.label)
}
