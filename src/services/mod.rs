//! Application services: the core's business logic, built only against
//! `domain::ports` traits.

pub mod agent_registry;
pub mod execution_service;
pub mod notification_dispatcher;
pub mod orchestrator;
pub mod schedule_engine;
pub mod score_calculator;
pub mod technique_validator;
pub mod token_blacklist;

pub use agent_registry::AgentRegistry;
pub use execution_service::ExecutionService;
pub use notification_dispatcher::{NotificationConfig, NotificationDispatcher};
pub use orchestrator::{plan_execution, Plan};
pub use schedule_engine::{calculate_next_run, ScheduleEngine};
pub use score_calculator::{calculate, classify, Outcome};
pub use technique_validator::{tactic_coverage, validate, ValidationReport};
pub use token_blacklist::TokenBlacklist;
