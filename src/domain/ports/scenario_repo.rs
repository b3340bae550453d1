//! Scenario repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::CoreResult;
use crate::domain::models::Scenario;

/// Repository interface for Scenario persistence.
#[async_trait]
pub trait ScenarioRepo: Send + Sync {
    async fn create(&self, scenario: &Scenario) -> CoreResult<()>;
    async fn update(&self, scenario: &Scenario) -> CoreResult<()>;
    async fn delete(&self, id: Uuid) -> CoreResult<()>;
    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Scenario>>;
    async fn find_all(&self) -> CoreResult<Vec<Scenario>>;
    async fn find_by_tag(&self, tag: &str) -> CoreResult<Vec<Scenario>>;
}
