//! Email delivery port.
//!
//! SMTP delivery itself is out of scope for this core (see Non-goals); the
//! `NotificationDispatcher` only needs something it can hand a rendered
//! message to and await a yes/no outcome from.

use async_trait::async_trait;

use crate::domain::errors::CoreResult;

/// A single rendered email, ready to send.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery boundary the `NotificationDispatcher` sends through.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> CoreResult<()>;
}
