//! Schedule/ScheduleRun repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::CoreResult;
use crate::domain::models::{Schedule, ScheduleRun, ScheduleStatus};

/// Repository interface for Schedule and ScheduleRun persistence.
///
/// Schedule exclusively owns its runs.
#[async_trait]
pub trait ScheduleRepo: Send + Sync {
    async fn create(&self, schedule: &Schedule) -> CoreResult<()>;
    async fn update(&self, schedule: &Schedule) -> CoreResult<()>;
    async fn delete(&self, id: Uuid) -> CoreResult<()>;
    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Schedule>>;
    async fn find_all(&self) -> CoreResult<Vec<Schedule>>;
    async fn find_by_status(&self, status: ScheduleStatus) -> CoreResult<Vec<Schedule>>;
    /// Active schedules with `next_run_at <= now`.
    async fn find_active_schedules_due(&self, now: DateTime<Utc>) -> CoreResult<Vec<Schedule>>;

    async fn create_run(&self, run: &ScheduleRun) -> CoreResult<()>;
    async fn update_run(&self, run: &ScheduleRun) -> CoreResult<()>;
    async fn find_runs_by_schedule_id(&self, schedule_id: Uuid) -> CoreResult<Vec<ScheduleRun>>;
}
