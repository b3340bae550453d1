use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use super::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid staleness_timeout_secs: {0}, must be positive")]
    InvalidStalenessTimeout(i64),

    #[error("invalid tick_interval_secs: {0}, must be positive")]
    InvalidTickInterval(u64),

    #[error("invalid email_worker_capacity: {0}, must be positive")]
    InvalidEmailWorkerCapacity(usize),

    #[error("invalid bcrypt_cost: {0}, must be between 4 and 31")]
    InvalidBcryptCost(u32),

    #[error("invalid log level: {0}, must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("invalid log format: {0}, must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `config.yaml` in the working directory
    /// 3. Environment variables (`CORE_` prefix, `__` as the nesting separator)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("config.yaml"))
            .merge(Env::prefixed("CORE_").split("__"))
            .extract()
            .context("failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.agents.staleness_timeout_secs <= 0 {
            return Err(ConfigError::InvalidStalenessTimeout(config.agents.staleness_timeout_secs));
        }
        if config.scheduling.tick_interval_secs == 0 {
            return Err(ConfigError::InvalidTickInterval(config.scheduling.tick_interval_secs));
        }
        if config.notifications.email_worker_capacity == 0 {
            return Err(ConfigError::InvalidEmailWorkerCapacity(config.notifications.email_worker_capacity));
        }
        if !(4..=31).contains(&config.auth.bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(config.auth.bcrypt_cost));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
