//! Agent repository port.

use async_trait::async_trait;

use crate::domain::errors::CoreResult;
use crate::domain::models::{Agent, AgentStatus};

/// Repository interface for Agent persistence.
#[async_trait]
pub trait AgentRepo: Send + Sync {
    async fn create(&self, agent: &Agent) -> CoreResult<()>;
    async fn update(&self, agent: &Agent) -> CoreResult<()>;
    async fn delete(&self, paw: &str) -> CoreResult<()>;
    async fn find_by_paw(&self, paw: &str) -> CoreResult<Option<Agent>>;
    /// Batch lookup, used by the planner/ExecutionService to avoid N+1 queries.
    async fn find_by_paws(&self, paws: &[String]) -> CoreResult<Vec<Agent>>;
    async fn find_all(&self) -> CoreResult<Vec<Agent>>;
    async fn find_by_status(&self, status: AgentStatus) -> CoreResult<Vec<Agent>>;
    async fn find_by_platform(&self, platform: &str) -> CoreResult<Vec<Agent>>;
    async fn update_last_seen(&self, paw: &str, last_seen: chrono::DateTime<chrono::Utc>) -> CoreResult<()>;
}
