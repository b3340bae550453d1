//! ScheduleEngine: a background loop firing due schedules, grounded on the
//! same tick-loop/`AtomicBool` shutdown pattern as the teacher's event
//! scheduler.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::errors::CoreResult;
use crate::domain::models::{Frequency, Schedule, ScheduleRun, ScheduleRunStatus, ScheduleStatus};
use crate::domain::ports::ScheduleRepo;
use crate::services::execution_service::ExecutionService;

/// Next firing time per `Schedule::frequency`. `once` has no next run;
/// `cron` delegates to the `cron` crate and must advance strictly past `now`.
pub fn calculate_next_run(frequency: Frequency, cron_expr: Option<&str>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match frequency {
        Frequency::Once => None,
        Frequency::Hourly => Some(now + Duration::hours(1)),
        Frequency::Daily => Some(now + Duration::days(1)),
        Frequency::Weekly => Some(now + Duration::weeks(1)),
        Frequency::Monthly => Some(now + Duration::days(30)),
        Frequency::Cron => {
            let expr = cron_expr?;
            match cron::Schedule::from_str(expr) {
                Ok(schedule) => schedule.after(&now).next(),
                Err(err) => {
                    warn!(expr, error = %err, "invalid cron expression, schedule will not re-fire");
                    None
                }
            }
        }
    }
}

pub struct ScheduleEngine {
    repo: Arc<dyn ScheduleRepo>,
    execution_service: Arc<ExecutionService>,
    running: Arc<AtomicBool>,
    tick_interval: StdDuration,
}

impl ScheduleEngine {
    /// `tick_interval_secs` is `Config.scheduling.tick_interval_secs`,
    /// already validated to be nonzero by `ConfigLoader::validate`.
    pub fn new(repo: Arc<dyn ScheduleRepo>, execution_service: Arc<ExecutionService>, tick_interval_secs: u64) -> Self {
        Self {
            repo,
            execution_service,
            running: Arc::new(AtomicBool::new(false)),
            tick_interval: StdDuration::from_secs(tick_interval_secs),
        }
    }

    /// Start the tick loop. Idempotent: a second call while already running
    /// is a no-op and returns `None`.
    pub fn start(self: &Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if self.running.swap(true, Ordering::SeqCst) {
            return None;
        }

        let engine = self.clone();
        Some(tokio::spawn(async move {
            while engine.running.load(Ordering::SeqCst) {
                tokio::time::sleep(engine.tick_interval).await;
                if !engine.running.load(Ordering::SeqCst) {
                    break;
                }
                if let Err(err) = engine.tick(Utc::now()).await {
                    error!(error = %err, "schedule engine tick failed");
                }
            }
        }))
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn tick(&self, now: DateTime<Utc>) -> CoreResult<()> {
        let due = self.repo.find_active_schedules_due(now).await?;
        for mut schedule in due {
            self.fire(&mut schedule, now).await;
        }
        Ok(())
    }

    /// Fire a single schedule: create a run, start the execution, update the
    /// schedule's run bookkeeping and `next_run_at`.
    async fn fire(&self, schedule: &mut Schedule, now: DateTime<Utc>) {
        let mut run = ScheduleRun::start(schedule.id);

        let agent_paws = schedule.agent_paw.clone().map(|p| vec![p]).unwrap_or_default();
        match self.execution_service.start_execution(schedule.scenario_id, agent_paws, schedule.safe_mode).await {
            Ok((execution, _dispatch)) => {
                run.execution_id = Some(execution.id);
                run.status = ScheduleRunStatus::Started;
            }
            Err(err) => {
                run.status = ScheduleRunStatus::Failed;
                run.error = Some(err.to_string());
                warn!(schedule_id = %schedule.id, error = %err, "schedule fire failed to start execution");
            }
        }
        run.completed_at = Some(Utc::now());

        if let Err(err) = self.repo.create_run(&run).await {
            error!(schedule_id = %schedule.id, error = %err, "failed to persist schedule run");
        }

        schedule.last_run_at = Some(now);
        schedule.last_run_id = Some(run.id);
        schedule.next_run_at = calculate_next_run(schedule.frequency, schedule.cron_expr.as_deref(), now);
        schedule.updated_at = Utc::now();
        if schedule.frequency == Frequency::Once {
            schedule.status = ScheduleStatus::Disabled;
        }

        if let Err(err) = self.repo.update(schedule).await {
            error!(schedule_id = %schedule.id, error = %err, "failed to persist schedule after fire");
        }

        info!(schedule_id = %schedule.id, run_id = %run.id, status = ?run.status, "schedule fired");
    }

    /// Manual override: fires immediately, bypassing the due check, without
    /// updating `next_run_at`.
    pub async fn run_now(&self, id: Uuid) -> CoreResult<()> {
        let Some(mut schedule) = self.repo.find_by_id(id).await? else {
            return Err(crate::domain::errors::CoreError::not_found("schedule", id));
        };

        let now = Utc::now();
        let next_run_at = schedule.next_run_at;
        self.fire(&mut schedule, now).await;
        schedule.next_run_at = next_run_at;
        self.repo.update(&schedule).await?;
        Ok(())
    }
}
