//! NotificationDispatcher: fan-out of lifecycle events to per-user settings,
//! with bounded async email delivery (capacity 10), grounded on the same
//! `Semaphore`-per-wave pattern the teacher uses for task concurrency.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::errors::CoreResult;
use crate::domain::models::{
    Channel, Execution, Notification, NotificationSettings, NotificationType, Scenario,
};
use crate::domain::ports::{EmailMessage, EmailSender, NotificationRepo};

const EMAIL_WORKER_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub email_worker_capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { email_worker_capacity: EMAIL_WORKER_CAPACITY }
    }
}

pub struct NotificationDispatcher {
    repo: Arc<dyn NotificationRepo>,
    email_sender: Option<Arc<dyn EmailSender>>,
    email_permits: Arc<Semaphore>,
}

impl NotificationDispatcher {
    pub fn new(
        repo: Arc<dyn NotificationRepo>,
        email_sender: Option<Arc<dyn EmailSender>>,
        config: NotificationConfig,
    ) -> Self {
        Self { repo, email_sender, email_permits: Arc::new(Semaphore::new(config.email_worker_capacity)) }
    }

    async fn dispatch(
        &self,
        notification_type: NotificationType,
        title: &str,
        message: &str,
        data: HashMap<String, Value>,
        flag: impl Fn(&NotificationSettings) -> bool,
    ) -> CoreResult<()> {
        let settings = self.repo.find_all_enabled_settings().await?;

        for setting in settings {
            if !flag(&setting) {
                continue;
            }

            let notification =
                Notification::new(setting.user_id, notification_type, title.to_string(), message.to_string(), data.clone());

            if let Err(err) = self.repo.create_notification(&notification).await {
                warn!(user_id = %setting.user_id, error = %err, "failed to create notification, continuing");
                continue;
            }

            if setting.channel == Channel::Email {
                if let Some(address) = setting.email_address.clone().filter(|a| !a.is_empty()) {
                    self.spawn_email_send(address, title.to_string(), message.to_string());
                }
            }
        }

        Ok(())
    }

    /// Fire-and-forget from the caller's perspective: acquire a permit from
    /// the bounded pool, send, log-only on failure.
    fn spawn_email_send(&self, to: String, subject: String, body: String) {
        let Some(sender) = self.email_sender.clone() else { return };
        let permits = self.email_permits.clone();

        tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else { return };
            let message = EmailMessage { to: to.clone(), subject, body };
            if let Err(err) = sender.send(message).await {
                error!(to, error = %err, "email send failed");
            }
        });
    }

    pub async fn notify_execution_started(&self, execution: &Execution, scenario: &Scenario) {
        let mut data = HashMap::new();
        data.insert("execution_id".to_string(), Value::String(execution.id.to_string()));
        data.insert("scenario_id".to_string(), Value::String(execution.scenario_id.to_string()));

        let result = self
            .dispatch(
                NotificationType::ExecutionStarted,
                &format!("Execution started: {}", scenario.name),
                &format!("Execution {} of scenario '{}' has started.", execution.id, scenario.name),
                data,
                |s| s.notify_on_start,
            )
            .await;

        if let Err(err) = result {
            error!(execution_id = %execution.id, error = %err, "failed to load notification settings");
        }
    }

    pub async fn notify_execution_completed(&self, execution: &Execution) {
        let mut data = HashMap::new();
        data.insert("execution_id".to_string(), Value::String(execution.id.to_string()));
        let overall = execution.score.as_ref().map(|s| s.overall).unwrap_or(0.0);
        data.insert("overall_score".to_string(), serde_json::json!(overall));

        let result = self
            .dispatch(
                NotificationType::ExecutionCompleted,
                "Execution completed",
                &format!("Execution {} completed with score {overall:.1}.", execution.id),
                data,
                |s| s.notify_on_complete,
            )
            .await;

        if let Err(err) = result {
            error!(execution_id = %execution.id, error = %err, "failed to load notification settings");
            return;
        }

        if let Err(err) = self.notify_score_alert_if_below_threshold(execution, overall).await {
            error!(execution_id = %execution.id, error = %err, "failed to load notification settings for score alert");
        }
    }

    async fn notify_score_alert_if_below_threshold(&self, execution: &Execution, overall: f64) -> CoreResult<()> {
        let settings = self.repo.find_all_enabled_settings().await?;

        for setting in settings {
            if !setting.notify_on_score_alert || overall >= setting.score_alert_threshold {
                continue;
            }

            let mut data = HashMap::new();
            data.insert("execution_id".to_string(), Value::String(execution.id.to_string()));
            data.insert("overall_score".to_string(), serde_json::json!(overall));
            data.insert("threshold".to_string(), serde_json::json!(setting.score_alert_threshold));

            let notification = Notification::new(
                setting.user_id,
                NotificationType::ScoreAlert,
                "Security score alert",
                format!(
                    "Execution {} scored {overall:.1}, below the alert threshold of {:.1}.",
                    execution.id, setting.score_alert_threshold
                ),
                data,
            );

            if let Err(err) = self.repo.create_notification(&notification).await {
                warn!(user_id = %setting.user_id, error = %err, "failed to create score alert notification, continuing");
            }
        }

        Ok(())
    }

    pub async fn notify_execution_failed(&self, execution: &Execution, reason: &str) {
        let mut data = HashMap::new();
        data.insert("execution_id".to_string(), Value::String(execution.id.to_string()));
        data.insert("reason".to_string(), Value::String(reason.to_string()));

        let result = self
            .dispatch(
                NotificationType::ExecutionFailed,
                "Execution failed",
                &format!("Execution {} ended: {reason}.", execution.id),
                data,
                |s| s.notify_on_failure,
            )
            .await;

        if let Err(err) = result {
            error!(execution_id = %execution.id, error = %err, "failed to load notification settings");
        }
    }

    pub async fn notify_agent_offline(&self, agent_paw: &str) {
        let mut data = HashMap::new();
        data.insert("agent_paw".to_string(), Value::String(agent_paw.to_string()));

        let result = self
            .dispatch(
                NotificationType::AgentOffline,
                "Agent went offline",
                &format!("Agent '{agent_paw}' has not been seen recently and is now marked offline."),
                data,
                |s| s.notify_on_agent_offline,
            )
            .await;

        if let Err(err) = result {
            error!(agent_paw, error = %err, "failed to load notification settings");
        }
    }
}
