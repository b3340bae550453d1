//! Notification/NotificationSettings repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::CoreResult;
use crate::domain::models::{Notification, NotificationSettings};

/// Repository interface for notification settings and delivered notifications.
#[async_trait]
pub trait NotificationRepo: Send + Sync {
    async fn create_settings(&self, settings: &NotificationSettings) -> CoreResult<()>;
    async fn update_settings(&self, settings: &NotificationSettings) -> CoreResult<()>;
    async fn find_settings_by_user(&self, user_id: Uuid) -> CoreResult<Option<NotificationSettings>>;
    /// All settings with `enabled = true`, across all users.
    async fn find_all_enabled_settings(&self) -> CoreResult<Vec<NotificationSettings>>;

    async fn create_notification(&self, notification: &Notification) -> CoreResult<()>;
    async fn find_notification_by_id(&self, id: Uuid) -> CoreResult<Option<Notification>>;
    async fn find_notifications_by_user_id(&self, user_id: Uuid) -> CoreResult<Vec<Notification>>;
    async fn find_unread_by_user_id(&self, user_id: Uuid) -> CoreResult<Vec<Notification>>;
    async fn mark_as_read(&self, id: Uuid) -> CoreResult<()>;
    async fn mark_all_as_read(&self, user_id: Uuid) -> CoreResult<()>;
}
