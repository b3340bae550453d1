//! Repository and external-collaborator ports.
//!
//! Abstract storage only — no implementation in-core. Concrete adapters
//! (a transactional store, an SMTP client) live outside this crate and are
//! supplied by the binary that wires the transport layer together.

pub mod agent_repo;
pub mod email_sender;
pub mod notification_repo;
pub mod result_repo;
pub mod schedule_repo;
pub mod scenario_repo;
pub mod technique_repo;
pub mod user_repo;

pub use agent_repo::AgentRepo;
pub use email_sender::{EmailMessage, EmailSender};
pub use notification_repo::NotificationRepo;
pub use result_repo::ResultRepo;
pub use schedule_repo::ScheduleRepo;
pub use scenario_repo::ScenarioRepo;
pub use technique_repo::TechniqueRepo;
pub use user_repo::{User, UserRepo};
