use std::io;

use anyhow::{bail, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::LoggingConfig;

/// Holds the non-blocking file appender's guard, if one was created. Dropping
/// it flushes buffered log lines, so callers must keep it alive for the
/// process lifetime.
pub struct LoggerGuard {
    _guard: Option<WorkerGuard>,
}

/// Initialize the global tracing subscriber from `config`. Must be called at
/// most once per process.
#[allow(clippy::too_many_lines)]
pub fn init(config: &LoggingConfig) -> Result<LoggerGuard> {
    let default_level = parse_log_level(&config.level)?;
    let env_filter = EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();

    let guard = if let Some(ref log_dir) = config.log_dir {
        let file_appender = rolling::daily(log_dir, "core.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking_file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter.clone());

        if config.enable_stdout {
            match config.format.as_str() {
                "json" => {
                    let stdout_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stdout)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_filter(env_filter);
                    tracing_subscriber::registry().with(file_layer).with(stdout_layer).init();
                }
                _ => {
                    let stdout_layer = tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(io::stdout)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_filter(env_filter);
                    tracing_subscriber::registry().with(file_layer).with(stdout_layer).init();
                }
            }
        } else {
            tracing_subscriber::registry().with(file_layer).init();
        }

        Some(guard)
    } else {
        match config.format.as_str() {
            "json" => {
                let stdout_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stdout)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(env_filter);
                tracing_subscriber::registry().with(stdout_layer).init();
            }
            _ => {
                let stdout_layer = tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(io::stdout)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_filter(env_filter);
                tracing_subscriber::registry().with(stdout_layer).init();
            }
        }

        None
    };

    tracing::info!(level = %config.level, format = %config.format, file_output = config.log_dir.is_some(), "logger initialized");

    Ok(LoggerGuard { _guard: guard })
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => bail!("invalid log level: {other}"),
    }
}
