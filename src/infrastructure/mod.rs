//! Ambient operational concerns: configuration, logging, admin bootstrap.

pub mod bootstrap;
pub mod config;
pub mod logging;

pub use bootstrap::{bootstrap_admin_secret, BootstrapSecret};
pub use config::{Config, ConfigLoader};
