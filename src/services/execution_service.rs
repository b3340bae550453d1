//! ExecutionService: owns the execution lifecycle state machine.
//!
//! ```text
//! pending --> running --> completed   (all results terminal)
//!                   |
//!                   +--> cancelled    (explicit cancel)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::errors::{CoreError, CoreResult};
use crate::domain::models::{
    Agent, AgentStatus, Execution, ExecutionResult, ExecutionStatus, ResultStatus, Scenario,
    Technique,
};
use crate::domain::ports::{AgentRepo, ResultRepo, ScenarioRepo, TechniqueRepo};
use crate::services::notification_dispatcher::NotificationDispatcher;
use crate::services::orchestrator::{self, Plan};
use crate::services::score_calculator;

/// Dispatch info handed back to the caller so it can push commands to agents.
pub use crate::domain::models::TaskDispatchInfo;

pub struct ExecutionService {
    result_repo: Arc<dyn ResultRepo>,
    scenario_repo: Arc<dyn ScenarioRepo>,
    technique_repo: Arc<dyn TechniqueRepo>,
    agent_repo: Arc<dyn AgentRepo>,
    notifications: Arc<NotificationDispatcher>,
}

impl ExecutionService {
    pub fn new(
        result_repo: Arc<dyn ResultRepo>,
        scenario_repo: Arc<dyn ScenarioRepo>,
        technique_repo: Arc<dyn TechniqueRepo>,
        agent_repo: Arc<dyn AgentRepo>,
        notifications: Arc<NotificationDispatcher>,
    ) -> Self {
        Self { result_repo, scenario_repo, technique_repo, agent_repo, notifications }
    }

    async fn load_catalog(&self, scenario: &Scenario) -> CoreResult<HashMap<String, Technique>> {
        let mut catalog = HashMap::new();
        for phase in &scenario.phases {
            for selection in &phase.techniques {
                if catalog.contains_key(&selection.technique_id) {
                    continue;
                }
                if let Some(technique) = self.technique_repo.find_by_id(&selection.technique_id).await? {
                    catalog.insert(technique.id.clone(), technique);
                }
            }
        }
        Ok(catalog)
    }

    /// Start an execution: plan tasks, persist the execution and its pending
    /// results atomically from the caller's perspective, return dispatch info.
    ///
    /// The core never pushes commands to agents itself; that's the
    /// transport's job once it has the returned `TaskDispatchInfo` list.
    pub async fn start_execution(
        &self,
        scenario_id: Uuid,
        agent_paws: Vec<String>,
        safe_mode: bool,
    ) -> CoreResult<(Execution, Vec<TaskDispatchInfo>)> {
        let scenario = self
            .scenario_repo
            .find_by_id(scenario_id)
            .await?
            .ok_or_else(|| CoreError::scenario_not_found(scenario_id))?;

        let agents = self.agent_repo.find_by_paws(&agent_paws).await?;
        self.ensure_all_resolved_and_online(&agent_paws, &agents)?;

        let catalog = self.load_catalog(&scenario).await?;
        let Plan { tasks } = orchestrator::plan_execution(&scenario, &agents, safe_mode, &catalog)?;

        let execution = Execution::new(scenario_id, agent_paws, safe_mode);
        self.result_repo.create_execution(&execution).await?;

        let mut dispatch = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let result = ExecutionResult::from_planned(execution.id, task);
            self.result_repo.create_result(&result).await?;
            dispatch.push(TaskDispatchInfo::new(&result, task));
        }

        info!(execution_id = %execution.id, scenario_id = %scenario_id, tasks = dispatch.len(), "execution started");
        self.notifications.notify_execution_started(&execution, &scenario).await;

        Ok((execution, dispatch))
    }

    fn ensure_all_resolved_and_online(&self, requested: &[String], found: &[Agent]) -> CoreResult<()> {
        for paw in requested {
            let agent = found
                .iter()
                .find(|a| &a.paw == paw)
                .ok_or_else(|| CoreError::agent_not_found(paw))?;
            if !agent.is_online() {
                return Err(CoreError::Precondition(format!("agent '{paw}' is offline")));
            }
        }
        Ok(())
    }

    /// Apply an agent-reported result update, then check for auto-completion.
    pub async fn update_result_by_id(
        &self,
        result_id: Uuid,
        status: ResultStatus,
        output: String,
        exit_code: Option<i32>,
        agent_paw: &str,
    ) -> CoreResult<()> {
        let mut result = self
            .result_repo
            .find_result_by_id(result_id)
            .await?
            .ok_or_else(|| CoreError::result_not_found(result_id))?;

        if !agent_paw.is_empty() && agent_paw != result.agent_paw {
            return Err(CoreError::Unauthorized(format!(
                "agent '{agent_paw}' does not own result '{result_id}'"
            )));
        }

        result.status = status;
        result.output = output;
        result.exit_code = exit_code;
        result.completed_at = Some(Utc::now());
        self.result_repo.update_result(&result).await?;

        self.check_and_complete_execution(result.execution_id).await;

        Ok(())
    }

    /// Check whether every result for an execution is terminal, and if so
    /// complete it. Errors are swallowed: the next result update retries the
    /// check, which is safe because this call is idempotent.
    async fn check_and_complete_execution(&self, execution_id: Uuid) {
        let results = match self.result_repo.find_results_by_execution(execution_id).await {
            Ok(results) => results,
            Err(err) => {
                warn!(%execution_id, error = %err, "failed to load results while checking completion");
                return;
            }
        };

        if results.iter().any(|r| !r.is_terminal()) {
            return;
        }

        if let Err(err) = self.complete_execution(execution_id).await {
            warn!(%execution_id, error = %err, "failed to auto-complete execution");
        }
    }

    /// Compute score and transition an execution to `completed`. A no-op if
    /// the execution is already terminal (keeps auto-completion idempotent
    /// under concurrent `UpdateResultByID` races).
    pub async fn complete_execution(&self, execution_id: Uuid) -> CoreResult<()> {
        let mut execution = self
            .result_repo
            .find_execution_by_id(execution_id)
            .await?
            .ok_or_else(|| CoreError::execution_not_found(execution_id))?;

        if execution.is_terminal() {
            return Ok(());
        }

        let results = self.result_repo.find_results_by_execution(execution_id).await?;
        let scenario = self.scenario_repo.find_by_id(execution.scenario_id).await?;
        let catalog = match &scenario {
            Some(scenario) => self.load_catalog(scenario).await?,
            None => HashMap::new(),
        };

        let score = score_calculator::calculate(&results, &catalog);

        execution.status = ExecutionStatus::Completed;
        execution.completed_at = Some(Utc::now());
        execution.score = Some(score);
        self.result_repo.update_execution(&execution).await?;

        info!(%execution_id, overall = execution.score.as_ref().map(|s| s.overall), "execution completed");
        self.notifications.notify_execution_completed(&execution).await;

        Ok(())
    }

    /// Cancel a non-terminal execution: mark every non-terminal result
    /// `skipped`, then mark the execution `cancelled`. No score is computed.
    pub async fn cancel_execution(&self, execution_id: Uuid) -> CoreResult<()> {
        let mut execution = self
            .result_repo
            .find_execution_by_id(execution_id)
            .await?
            .ok_or_else(|| CoreError::execution_not_found(execution_id))?;

        if execution.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "execution '{execution_id}' is already terminal"
            )));
        }

        let results = self.result_repo.find_results_by_execution(execution_id).await?;
        let now = Utc::now();
        for mut result in results {
            if !result.is_terminal() {
                result.mark_skipped(now);
                self.result_repo.update_result(&result).await?;
            }
        }

        execution.status = ExecutionStatus::Cancelled;
        execution.completed_at = Some(now);
        self.result_repo.update_execution(&execution).await?;

        info!(%execution_id, "execution cancelled");

        Ok(())
    }

    /// Periodic reconciler over executions stuck in `running`: re-runs the
    /// completion check for each, so a transient error that raced a result's
    /// final update doesn't strand the execution forever (see the design
    /// note on `checkAndCompleteExecution` swallowing errors).
    pub async fn reconcile_stuck_executions(&self) -> CoreResult<usize> {
        let running = self.result_repo.find_running_executions().await?;
        let count = running.len();
        for execution in running {
            self.check_and_complete_execution(execution.id).await;
        }
        Ok(count)
    }
}
