//! Hand-written in-memory port implementations for integration tests.
//!
//! Grounded on the teacher's null-object repository pattern
//! (`domain/ports/null_memory.rs`), generalized from "store nothing" to
//! "store in a `Mutex<HashMap>`" since these doubles back whole end-to-end
//! scenarios rather than standing in for a disabled feature.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use attack_range_core::domain::errors::CoreResult;
use attack_range_core::domain::models::{
    Agent, AgentStatus, Execution, ExecutionResult, Notification, NotificationSettings, Schedule,
    ScheduleRun, ScheduleStatus, Scenario, Tactic, Technique,
};
use attack_range_core::domain::ports::{
    AgentRepo, EmailMessage, EmailSender, NotificationRepo, ResultRepo, ScenarioRepo, ScheduleRepo,
    TechniqueRepo,
};

#[derive(Default)]
pub struct InMemoryAgentRepo {
    agents: Mutex<HashMap<String, Agent>>,
}

#[async_trait]
impl AgentRepo for InMemoryAgentRepo {
    async fn create(&self, agent: &Agent) -> CoreResult<()> {
        self.agents.lock().unwrap().insert(agent.paw.clone(), agent.clone());
        Ok(())
    }

    async fn update(&self, agent: &Agent) -> CoreResult<()> {
        self.agents.lock().unwrap().insert(agent.paw.clone(), agent.clone());
        Ok(())
    }

    async fn delete(&self, paw: &str) -> CoreResult<()> {
        self.agents.lock().unwrap().remove(paw);
        Ok(())
    }

    async fn find_by_paw(&self, paw: &str) -> CoreResult<Option<Agent>> {
        Ok(self.agents.lock().unwrap().get(paw).cloned())
    }

    async fn find_by_paws(&self, paws: &[String]) -> CoreResult<Vec<Agent>> {
        let agents = self.agents.lock().unwrap();
        Ok(paws.iter().filter_map(|p| agents.get(p).cloned()).collect())
    }

    async fn find_all(&self) -> CoreResult<Vec<Agent>> {
        Ok(self.agents.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_status(&self, status: AgentStatus) -> CoreResult<Vec<Agent>> {
        Ok(self.agents.lock().unwrap().values().filter(|a| a.status == status).cloned().collect())
    }

    async fn find_by_platform(&self, platform: &str) -> CoreResult<Vec<Agent>> {
        Ok(self
            .agents
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.platform.as_str().eq_ignore_ascii_case(platform))
            .cloned()
            .collect())
    }

    async fn update_last_seen(&self, paw: &str, last_seen: DateTime<Utc>) -> CoreResult<()> {
        if let Some(agent) = self.agents.lock().unwrap().get_mut(paw) {
            agent.last_seen = last_seen;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryScenarioRepo {
    scenarios: Mutex<HashMap<Uuid, Scenario>>,
}

#[async_trait]
impl ScenarioRepo for InMemoryScenarioRepo {
    async fn create(&self, scenario: &Scenario) -> CoreResult<()> {
        self.scenarios.lock().unwrap().insert(scenario.id, scenario.clone());
        Ok(())
    }

    async fn update(&self, scenario: &Scenario) -> CoreResult<()> {
        self.scenarios.lock().unwrap().insert(scenario.id, scenario.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        self.scenarios.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Scenario>> {
        Ok(self.scenarios.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> CoreResult<Vec<Scenario>> {
        Ok(self.scenarios.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_tag(&self, tag: &str) -> CoreResult<Vec<Scenario>> {
        Ok(self.scenarios.lock().unwrap().values().filter(|s| s.tags.iter().any(|t| t == tag)).cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryTechniqueRepo {
    techniques: Mutex<HashMap<String, Technique>>,
}

#[async_trait]
impl TechniqueRepo for InMemoryTechniqueRepo {
    async fn create(&self, technique: &Technique) -> CoreResult<()> {
        self.techniques.lock().unwrap().insert(technique.id.clone(), technique.clone());
        Ok(())
    }

    async fn update(&self, technique: &Technique) -> CoreResult<()> {
        self.techniques.lock().unwrap().insert(technique.id.clone(), technique.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        self.techniques.lock().unwrap().remove(id);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Technique>> {
        Ok(self.techniques.lock().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> CoreResult<Vec<Technique>> {
        Ok(self.techniques.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_tactic(&self, tactic: Tactic) -> CoreResult<Vec<Technique>> {
        Ok(self.techniques.lock().unwrap().values().filter(|t| t.all_tactics().contains(&tactic)).cloned().collect())
    }

    async fn find_by_platform(&self, platform: &str) -> CoreResult<Vec<Technique>> {
        Ok(self
            .techniques
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.platforms.iter().any(|p| p.eq_ignore_ascii_case(platform)))
            .cloned()
            .collect())
    }

    async fn import_from_yaml(&self, _yaml: &str) -> CoreResult<usize> {
        Ok(0)
    }
}

#[derive(Default)]
pub struct InMemoryResultRepo {
    executions: Mutex<HashMap<Uuid, Execution>>,
    results: Mutex<HashMap<Uuid, ExecutionResult>>,
}

#[async_trait]
impl ResultRepo for InMemoryResultRepo {
    async fn create_execution(&self, execution: &Execution) -> CoreResult<()> {
        self.executions.lock().unwrap().insert(execution.id, execution.clone());
        Ok(())
    }

    async fn update_execution(&self, execution: &Execution) -> CoreResult<()> {
        self.executions.lock().unwrap().insert(execution.id, execution.clone());
        Ok(())
    }

    async fn find_execution_by_id(&self, id: Uuid) -> CoreResult<Option<Execution>> {
        Ok(self.executions.lock().unwrap().get(&id).cloned())
    }

    async fn find_executions_by_scenario(&self, scenario_id: Uuid) -> CoreResult<Vec<Execution>> {
        Ok(self.executions.lock().unwrap().values().filter(|e| e.scenario_id == scenario_id).cloned().collect())
    }

    async fn find_recent_executions(&self, limit: usize) -> CoreResult<Vec<Execution>> {
        let mut executions: Vec<Execution> = self.executions.lock().unwrap().values().cloned().collect();
        executions.sort_by_key(|e| std::cmp::Reverse(e.started_at));
        executions.truncate(limit);
        Ok(executions)
    }

    async fn find_executions_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> CoreResult<Vec<Execution>> {
        Ok(self
            .executions
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.started_at >= from && e.started_at <= to)
            .cloned()
            .collect())
    }

    async fn find_completed_executions_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> CoreResult<Vec<Execution>> {
        Ok(self
            .executions
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.completed_at.is_some_and(|c| c >= from && c <= to))
            .cloned()
            .collect())
    }

    async fn find_running_executions(&self) -> CoreResult<Vec<Execution>> {
        Ok(self
            .executions
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.status == attack_range_core::domain::models::ExecutionStatus::Running)
            .cloned()
            .collect())
    }

    async fn create_result(&self, result: &ExecutionResult) -> CoreResult<()> {
        self.results.lock().unwrap().insert(result.id, result.clone());
        Ok(())
    }

    async fn update_result(&self, result: &ExecutionResult) -> CoreResult<()> {
        self.results.lock().unwrap().insert(result.id, result.clone());
        Ok(())
    }

    async fn find_result_by_id(&self, id: Uuid) -> CoreResult<Option<ExecutionResult>> {
        Ok(self.results.lock().unwrap().get(&id).cloned())
    }

    async fn find_results_by_execution(&self, execution_id: Uuid) -> CoreResult<Vec<ExecutionResult>> {
        Ok(self.results.lock().unwrap().values().filter(|r| r.execution_id == execution_id).cloned().collect())
    }

    async fn find_results_by_technique(&self, technique_id: &str) -> CoreResult<Vec<ExecutionResult>> {
        Ok(self.results.lock().unwrap().values().filter(|r| r.technique_id == technique_id).cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryScheduleRepo {
    schedules: Mutex<HashMap<Uuid, Schedule>>,
    runs: Mutex<HashMap<Uuid, ScheduleRun>>,
}

#[async_trait]
impl ScheduleRepo for InMemoryScheduleRepo {
    async fn create(&self, schedule: &Schedule) -> CoreResult<()> {
        self.schedules.lock().unwrap().insert(schedule.id, schedule.clone());
        Ok(())
    }

    async fn update(&self, schedule: &Schedule) -> CoreResult<()> {
        self.schedules.lock().unwrap().insert(schedule.id, schedule.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        self.schedules.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Schedule>> {
        Ok(self.schedules.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> CoreResult<Vec<Schedule>> {
        Ok(self.schedules.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_status(&self, status: ScheduleStatus) -> CoreResult<Vec<Schedule>> {
        Ok(self.schedules.lock().unwrap().values().filter(|s| s.status == status).cloned().collect())
    }

    async fn find_active_schedules_due(&self, now: DateTime<Utc>) -> CoreResult<Vec<Schedule>> {
        Ok(self.schedules.lock().unwrap().values().filter(|s| s.is_due(now)).cloned().collect())
    }

    async fn create_run(&self, run: &ScheduleRun) -> CoreResult<()> {
        self.runs.lock().unwrap().insert(run.id, run.clone());
        Ok(())
    }

    async fn update_run(&self, run: &ScheduleRun) -> CoreResult<()> {
        self.runs.lock().unwrap().insert(run.id, run.clone());
        Ok(())
    }

    async fn find_runs_by_schedule_id(&self, schedule_id: Uuid) -> CoreResult<Vec<ScheduleRun>> {
        Ok(self.runs.lock().unwrap().values().filter(|r| r.schedule_id == schedule_id).cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryNotificationRepo {
    settings: Mutex<HashMap<Uuid, NotificationSettings>>,
    notifications: Mutex<HashMap<Uuid, Notification>>,
}

#[async_trait]
impl NotificationRepo for InMemoryNotificationRepo {
    async fn create_settings(&self, settings: &NotificationSettings) -> CoreResult<()> {
        self.settings.lock().unwrap().insert(settings.user_id, settings.clone());
        Ok(())
    }

    async fn update_settings(&self, settings: &NotificationSettings) -> CoreResult<()> {
        self.settings.lock().unwrap().insert(settings.user_id, settings.clone());
        Ok(())
    }

    async fn find_settings_by_user(&self, user_id: Uuid) -> CoreResult<Option<NotificationSettings>> {
        Ok(self.settings.lock().unwrap().get(&user_id).cloned())
    }

    async fn find_all_enabled_settings(&self) -> CoreResult<Vec<NotificationSettings>> {
        Ok(self.settings.lock().unwrap().values().filter(|s| s.enabled).cloned().collect())
    }

    async fn create_notification(&self, notification: &Notification) -> CoreResult<()> {
        self.notifications.lock().unwrap().insert(notification.id, notification.clone());
        Ok(())
    }

    async fn find_notification_by_id(&self, id: Uuid) -> CoreResult<Option<Notification>> {
        Ok(self.notifications.lock().unwrap().get(&id).cloned())
    }

    async fn find_notifications_by_user_id(&self, user_id: Uuid) -> CoreResult<Vec<Notification>> {
        Ok(self.notifications.lock().unwrap().values().filter(|n| n.user_id == user_id).cloned().collect())
    }

    async fn find_unread_by_user_id(&self, user_id: Uuid) -> CoreResult<Vec<Notification>> {
        Ok(self.notifications.lock().unwrap().values().filter(|n| n.user_id == user_id && !n.read).cloned().collect())
    }

    async fn mark_as_read(&self, id: Uuid) -> CoreResult<()> {
        if let Some(n) = self.notifications.lock().unwrap().get_mut(&id) {
            n.read = true;
        }
        Ok(())
    }

    async fn mark_all_as_read(&self, user_id: Uuid) -> CoreResult<()> {
        for n in self.notifications.lock().unwrap().values_mut() {
            if n.user_id == user_id {
                n.read = true;
            }
        }
        Ok(())
    }
}

/// Email sender double that records every message it was asked to send.
#[derive(Default)]
pub struct RecordingEmailSender {
    pub sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> CoreResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
