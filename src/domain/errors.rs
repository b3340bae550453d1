//! Error taxonomy for the execution-and-scheduling core.

use thiserror::Error;
use uuid::Uuid;

/// Core-level errors, one variant per kind named in the design.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("transient error, caller may retry: {0}")]
    Transient(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation(messages)
    }

    pub fn agent_not_found(paw: &str) -> Self {
        Self::not_found("agent", paw)
    }

    pub fn scenario_not_found(id: Uuid) -> Self {
        Self::not_found("scenario", id)
    }

    pub fn execution_not_found(id: Uuid) -> Self {
        Self::not_found("execution", id)
    }

    pub fn result_not_found(id: Uuid) -> Self {
        Self::not_found("result", id)
    }
}

/// Standard result alias used throughout the core.
pub type CoreResult<T> = Result<T, CoreError>;
