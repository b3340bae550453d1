//! Execution/ExecutionResult repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::CoreResult;
use crate::domain::models::{Execution, ExecutionResult};

/// Repository interface for Execution and ExecutionResult persistence.
///
/// Execution exclusively owns its results; the repository is expected to
/// cascade deletes accordingly.
#[async_trait]
pub trait ResultRepo: Send + Sync {
    async fn create_execution(&self, execution: &Execution) -> CoreResult<()>;
    async fn update_execution(&self, execution: &Execution) -> CoreResult<()>;
    async fn find_execution_by_id(&self, id: Uuid) -> CoreResult<Option<Execution>>;
    async fn find_executions_by_scenario(&self, scenario_id: Uuid) -> CoreResult<Vec<Execution>>;
    async fn find_recent_executions(&self, limit: usize) -> CoreResult<Vec<Execution>>;
    async fn find_executions_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> CoreResult<Vec<Execution>>;
    async fn find_completed_executions_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> CoreResult<Vec<Execution>>;
    /// Executions whose status is `running`, for the stuck-execution reconciler.
    async fn find_running_executions(&self) -> CoreResult<Vec<Execution>>;

    async fn create_result(&self, result: &ExecutionResult) -> CoreResult<()>;
    async fn update_result(&self, result: &ExecutionResult) -> CoreResult<()>;
    async fn find_result_by_id(&self, id: Uuid) -> CoreResult<Option<ExecutionResult>>;
    async fn find_results_by_execution(&self, execution_id: Uuid) -> CoreResult<Vec<ExecutionResult>>;
    async fn find_results_by_technique(&self, technique_id: &str) -> CoreResult<Vec<ExecutionResult>>;
}
