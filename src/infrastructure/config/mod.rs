//! Configuration model and hierarchical loader.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the execution-and-scheduling core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub agents: AgentsConfig,
    pub scheduling: SchedulingConfig,
    pub notifications: NotificationsConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agents: AgentsConfig::default(),
            scheduling: SchedulingConfig::default(),
            notifications: NotificationsConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Seconds of silence after which an online agent is swept to offline.
    pub staleness_timeout_secs: i64,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self { staleness_timeout_secs: 300 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    pub tick_interval_secs: u64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self { tick_interval_secs: 30 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub email_worker_capacity: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { email_worker_capacity: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub log_dir: Option<String>,
    pub enable_stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string(), log_dir: None, enable_stdout: true }
    }
}
