//! Execution-and-scheduling core of an adversary-emulation control plane.
//!
//! This crate holds the domain model, the pure/async services operating on
//! it, and the ambient infrastructure (configuration, logging, admin
//! bootstrap) the services run under. Transport (HTTP, gRPC), persistence
//! (SQL), auth token issuance, and SMTP delivery are deliberately left as
//! unimplemented ports for a binary crate to wire up.

pub mod domain;
pub mod infrastructure;
pub mod services;
