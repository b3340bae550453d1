//! Domain models.
//!
//! Pure domain entities with business logic and validation rules. These
//! models are framework-agnostic and carry no persistence or transport
//! concerns.

pub mod agent;
pub mod execution;
pub mod notification;
pub mod schedule;
pub mod score;
pub mod scenario;
pub mod technique;

pub use agent::{Agent, AgentStatus, Platform};
pub use execution::{
    Execution, ExecutionResult, ExecutionStatus, PlannedTask, ResultStatus, TaskDispatchInfo,
};
pub use notification::{Channel, Notification, NotificationSettings, NotificationType};
pub use schedule::{Frequency, Schedule, ScheduleRun, ScheduleRunStatus, ScheduleStatus};
pub use score::SecurityScore;
pub use scenario::{Phase, Scenario, TechniqueSelection};
pub use technique::{Executor, Tactic, Technique};
