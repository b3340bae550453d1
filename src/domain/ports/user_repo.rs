//! User repository port.
//!
//! User/role management proper lives outside this core (see Non-goals); this
//! trait is named here only because `ExecutionService`/`NotificationDispatcher`
//! need to resolve user ids for notification fan-out, and `DeactivateAdminIfNotLast`
//! is the one operation with a core-relevant invariant (§8 property 10).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::CoreResult;

/// Minimal user record the core needs for notification targeting.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub active: bool,
}

/// Repository interface for user persistence.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, user: &User) -> CoreResult<()>;
    async fn update(&self, user: &User) -> CoreResult<()>;
    async fn delete(&self, id: Uuid) -> CoreResult<()>;
    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<User>>;
    async fn find_all(&self) -> CoreResult<Vec<User>>;

    /// Atomically deactivate the user, rejecting with `CoreError::Conflict`
    /// if `id` is the last active admin.
    async fn deactivate_admin_if_not_last(&self, id: Uuid) -> CoreResult<()>;
}
