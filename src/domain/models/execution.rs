//! Execution and ExecutionResult domain models, plus the ephemeral
//! PlannedTask the orchestrator produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::score::SecurityScore;

/// A planned, not-yet-persisted unit of work: one technique against one agent.
///
/// Never stored directly; the `ExecutionService` materializes each one as a
/// pending `ExecutionResult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedTask {
    pub technique_id: String,
    pub agent_paw: String,
    pub executor_type: String,
    pub executor_name: Option<String>,
    pub command: String,
    pub timeout: u32,
    pub cleanup: Option<String>,
}

/// Status of an `Execution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// A single run of a scenario against a set of agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub id: Uuid,
    pub scenario_id: Uuid,
    pub agent_paws: Vec<String>,
    pub status: ExecutionStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub safe_mode: bool,
    pub score: Option<SecurityScore>,
}

impl Execution {
    pub fn new(scenario_id: Uuid, agent_paws: Vec<String>, safe_mode: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            scenario_id,
            agent_paws,
            status: ExecutionStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
            safe_mode,
            score: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Status of a single `ExecutionResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Pending,
    Running,
    Success,
    Failure,
    Skipped,
}

impl ResultStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }
}

/// The outcome of executing one `PlannedTask` on one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub id: Uuid,
    pub execution_id: Uuid,
    pub technique_id: String,
    pub agent_paw: String,
    pub executor_name: Option<String>,
    pub command: String,
    pub status: ResultStatus,
    pub output: String,
    pub exit_code: Option<i32>,
    pub detected: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ExecutionResult {
    /// Materialize a pending result from a planned task.
    pub fn from_planned(execution_id: Uuid, task: &PlannedTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            execution_id,
            technique_id: task.technique_id.clone(),
            agent_paw: task.agent_paw.clone(),
            executor_name: task.executor_name.clone(),
            command: task.command.clone(),
            status: ResultStatus::Pending,
            output: String::new(),
            exit_code: None,
            detected: false,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Mark this result `skipped` with `completed_at = now`. Used by cancel.
    pub fn mark_skipped(&mut self, now: DateTime<Utc>) {
        self.status = ResultStatus::Skipped;
        self.completed_at = Some(now);
    }
}

/// Info handed back to the caller so the transport layer can push commands
/// to agents. Not persisted as its own entity; derived from an `ExecutionResult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDispatchInfo {
    pub result_id: Uuid,
    pub agent_paw: String,
    pub executor_type: String,
    pub command: String,
    pub timeout: u32,
    pub cleanup: Option<String>,
}

impl TaskDispatchInfo {
    pub fn new(result: &ExecutionResult, task: &PlannedTask) -> Self {
        Self {
            result_id: result.id,
            agent_paw: result.agent_paw.clone(),
            executor_type: task.executor_type.clone(),
            command: result.command.clone(),
            timeout: task.timeout,
            cleanup: task.cleanup.clone(),
        }
    }
}
