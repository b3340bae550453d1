//! Notification and NotificationSettings domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Delivery channel for a user's notification settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Webhook,
}

/// Per-user notification preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub user_id: Uuid,
    pub channel: Channel,
    pub email_address: Option<String>,
    pub webhook_url: Option<String>,
    pub enabled: bool,
    pub notify_on_start: bool,
    pub notify_on_complete: bool,
    pub notify_on_failure: bool,
    pub notify_on_score_alert: bool,
    pub notify_on_agent_offline: bool,
    pub score_alert_threshold: f64,
}

/// The kind of lifecycle event a `Notification` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ExecutionStarted,
    ExecutionCompleted,
    ExecutionFailed,
    AgentOffline,
    ScoreAlert,
}

/// A single notification delivered (or queued for delivery) to a user.
///
/// `data` is an open map so new notification types don't require a schema
/// migration; consumers read it as JSON regardless of how this field is
/// represented internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub data: HashMap<String, Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        data: HashMap<String, Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            notification_type,
            title: title.into(),
            message: message.into(),
            data,
            read: false,
            created_at: Utc::now(),
        }
    }
}
