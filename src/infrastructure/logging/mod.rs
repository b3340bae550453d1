//! Structured logging setup.

mod logger;

pub use logger::LoggerGuard;

use anyhow::Result;

use crate::infrastructure::config::LoggingConfig;

pub fn init(config: &LoggingConfig) -> Result<LoggerGuard> {
    logger::init(config)
}
