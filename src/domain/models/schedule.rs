//! Schedule and ScheduleRun domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a schedule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Once,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Cron,
}

/// Lifecycle status of a `Schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Active,
    Paused,
    Disabled,
}

/// A recurring (or one-shot) directive to start an execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub name: String,
    pub scenario_id: Uuid,
    pub agent_paw: Option<String>,
    pub frequency: Frequency,
    pub cron_expr: Option<String>,
    pub safe_mode: bool,
    pub status: ScheduleStatus,
    pub next_run_at: Option<DateTime<Utc>>,
    pub last_run_at: Option<DateTime<Utc>>,
    pub last_run_id: Option<Uuid>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == ScheduleStatus::Active
            && self.next_run_at.is_some_and(|at| at <= now)
    }
}

/// Status of a single `ScheduleRun` fire attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleRunStatus {
    Running,
    Started,
    Failed,
}

/// One record per fire attempt of a `Schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRun {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub execution_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: ScheduleRunStatus,
    pub error: Option<String>,
}

impl ScheduleRun {
    pub fn start(schedule_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            schedule_id,
            execution_id: None,
            started_at: Utc::now(),
            completed_at: None,
            status: ScheduleRunStatus::Running,
            error: None,
        }
    }
}
