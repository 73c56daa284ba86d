//! Scripted in-memory service for tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rdip_client::{ClientError, HealthResponse, Result};
use rdip_core::domain::job::{AnalysisResult, Job, JobStatus};
use rdip_core::dto::analyze::AnalyzeRequest;
use tokio::sync::Semaphore;

use crate::api::AnalysisApi;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Reply {
    Job(Job),
    Error { status: u16, body: String },
}

impl Reply {
    pub fn unavailable() -> Self {
        Reply::Error {
            status: 502,
            body: "Bad Gateway".into(),
        }
    }

    fn into_result(self) -> Result<Job> {
        match self {
            Reply::Job(job) => Ok(job),
            Reply::Error { status, body } => Err(ClientError::from_body(status, &body)),
        }
    }
}

pub fn pending(id: &str, status: JobStatus, progress: u8) -> Job {
    Job {
        id: id.to_string(),
        status,
        progress,
        result: None,
        error: None,
        created_at: None,
    }
}

pub fn completed(id: &str, result: AnalysisResult) -> Job {
    Job {
        progress: 100,
        result: Some(result),
        ..pending(id, JobStatus::Completed, 100)
    }
}

pub fn failed(id: &str, error: Option<&str>) -> Job {
    Job {
        error: error.map(str::to_string),
        ..pending(id, JobStatus::Failed, 30)
    }
}

#[derive(Default)]
struct Script {
    submits: VecDeque<Reply>,
    statuses: HashMap<String, VecDeque<Reply>>,
    // Answer repeated once a job's script runs out
    fallback: HashMap<String, Reply>,
    status_calls: HashMap<String, u32>,
    submit_calls: u32,
    health: Option<std::result::Result<u16, String>>,
}

/// `AnalysisApi` answering from per-job scripts
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<Script>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    submit_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_submit(&self, reply: Reply) {
        self.script.lock().unwrap().submits.push_back(reply);
    }

    pub fn push_status(&self, job_id: &str, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .statuses
            .entry(job_id.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn repeat_status(&self, job_id: &str, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .fallback
            .insert(job_id.to_string(), reply);
    }

    pub fn set_health(&self, outcome: std::result::Result<u16, String>) {
        self.script.lock().unwrap().health = Some(outcome);
    }

    /// Status calls for `job_id` block until the returned semaphore gets permits
    pub fn gate(&self, job_id: &str) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates
            .lock()
            .unwrap()
            .insert(job_id.to_string(), Arc::clone(&gate));
        gate
    }

    /// Submissions block until the returned semaphore gets permits
    pub fn submit_gate(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.submit_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn status_calls(&self, job_id: &str) -> u32 {
        self.script
            .lock()
            .unwrap()
            .status_calls
            .get(job_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn submit_calls(&self) -> u32 {
        self.script.lock().unwrap().submit_calls
    }
}

#[async_trait]
impl AnalysisApi for ScriptedApi {
    async fn submit_analysis(&self, _request: &AnalyzeRequest) -> Result<Job> {
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.submit_calls += 1;
            script.submits.pop_front().expect("unscripted submission")
        };

        let gate = self.submit_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        reply.into_result()
    }

    async fn job_status(&self, job_id: &str) -> Result<Job> {
        let reply = {
            let mut script = self.script.lock().unwrap();
            *script.status_calls.entry(job_id.to_string()).or_default() += 1;
            let scripted = script
                .statuses
                .get_mut(job_id)
                .and_then(|queue| queue.pop_front());
            scripted
                .or_else(|| script.fallback.get(job_id).cloned())
                .unwrap_or_else(|| Reply::Error {
                    status: 404,
                    body: r#"{"detail": "Job not found"}"#.into(),
                })
        };

        let gate = self.gates.lock().unwrap().get(job_id).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        reply.into_result()
    }

    async fn health(&self) -> Result<HealthResponse> {
        let outcome = self.script.lock().unwrap().health.clone();
        match outcome {
            Some(Ok(status)) => Ok(HealthResponse { status }),
            Some(Err(message)) => Err(ClientError::ParseError(message)),
            None => Ok(HealthResponse { status: 200 }),
        }
    }
}
