//! Job domain types

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque analysis payload attached to a completed job.
///
/// The client passes it through untouched.
pub type AnalysisResult = serde_json::Value;

/// Opaque trending-topics payload.
pub type TrendingResult = serde_json::Value;

/// Job id the service uses for answers served from its cache
pub const CACHE_JOB_ID: &str = "cache";

/// Snapshot of one submitted unit of work, as reported by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "job_id", alias = "id")]
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub result: Option<AnalysisResult>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Job status reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether no further polling should happen for this status
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// What a single job snapshot means to a watcher
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// Still queued or processing
    Pending { status: JobStatus, progress: u8 },
    /// Completed with its result
    Completed(AnalysisResult),
    /// Failed; carries the service message if it sent one
    Failed(Option<String>),
    /// Reported completed but carried no result
    MissingResult,
}

impl Job {
    /// Interpret this snapshot
    pub fn outcome(&self) -> JobOutcome {
        match self.status {
            JobStatus::Completed => match &self.result {
                Some(result) => JobOutcome::Completed(result.clone()),
                None => JobOutcome::MissingResult,
            },
            JobStatus::Failed => JobOutcome::Failed(self.error.clone()),
            status => JobOutcome::Pending {
                status,
                progress: self.progress.min(100),
            },
        }
    }

    /// Consume the snapshot, returning the result if it is a finished one
    pub fn into_result(self) -> Option<AnalysisResult> {
        if self.status == JobStatus::Completed {
            self.result
        } else {
            None
        }
    }

    /// Whether the service answered from its cache
    pub fn is_cached(&self) -> bool {
        self.id == CACHE_JOB_ID
    }
}

/// Accepts RFC 3339 timestamps and the naive ISO-8601 form the service emits.
/// Anything else becomes `None`; the timestamp is informational only.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => parse_timestamp(&s),
        _ => None,
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_service_job() {
        let job: Job = serde_json::from_value(json!({
            "job_id": "0b7f2a1e",
            "status": "processing",
            "progress": 35,
            "result": null,
            "error": null,
            "created_at": "2025-03-01T12:30:45.123456"
        }))
        .unwrap();

        assert_eq!(job.id, "0b7f2a1e");
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.progress, 35);
        assert!(job.created_at.is_some());
        assert_eq!(
            job.outcome(),
            JobOutcome::Pending {
                status: JobStatus::Processing,
                progress: 35
            }
        );
    }

    #[test]
    fn test_accepts_id_alias_and_missing_fields() {
        let job: Job = serde_json::from_value(json!({
            "id": "abc",
            "status": "queued"
        }))
        .unwrap();

        assert_eq!(job.id, "abc");
        assert_eq!(job.progress, 0);
        assert!(job.result.is_none());
        assert!(job.created_at.is_none());
    }

    #[test]
    fn test_bad_timestamp_is_ignored() {
        let job: Job = serde_json::from_value(json!({
            "job_id": "abc",
            "status": "queued",
            "created_at": "yesterday"
        }))
        .unwrap();

        assert!(job.created_at.is_none());
    }

    #[test]
    fn test_non_string_timestamp_is_ignored() {
        for created_at in [json!(1700000000), json!({"ts": 1}), json!(true)] {
            let job: Job = serde_json::from_value(json!({
                "job_id": "abc",
                "status": "processing",
                "progress": 40,
                "created_at": created_at
            }))
            .unwrap();

            assert!(job.created_at.is_none());
            assert_eq!(job.progress, 40);
        }
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let ts = parse_timestamp("2025-03-01T12:30:45Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T12:30:45+00:00");
    }

    #[test]
    fn test_cached_completion() {
        let job: Job = serde_json::from_value(json!({
            "job_id": "cache",
            "status": "completed",
            "progress": 100,
            "result": {"summary_post": "..."}
        }))
        .unwrap();

        assert!(job.is_cached());
        assert_eq!(
            job.outcome(),
            JobOutcome::Completed(json!({"summary_post": "..."}))
        );
    }

    #[test]
    fn test_terminal_outcomes() {
        let failed = Job {
            id: "x".into(),
            status: JobStatus::Failed,
            progress: 30,
            result: None,
            error: Some("Thread not found".into()),
            created_at: None,
        };
        assert_eq!(
            failed.outcome(),
            JobOutcome::Failed(Some("Thread not found".into()))
        );

        let empty = Job {
            status: JobStatus::Completed,
            error: None,
            ..failed
        };
        assert_eq!(empty.outcome(), JobOutcome::MissingResult);
        assert!(JobStatus::Completed.is_terminal());
        assert!(!JobStatus::Queued.is_terminal());
    }

    #[test]
    fn test_progress_is_clamped() {
        let job = Job {
            id: "x".into(),
            status: JobStatus::Queued,
            progress: 250,
            result: None,
            error: None,
            created_at: None,
        };
        assert_eq!(
            job.outcome(),
            JobOutcome::Pending {
                status: JobStatus::Queued,
                progress: 100
            }
        );
    }
}
