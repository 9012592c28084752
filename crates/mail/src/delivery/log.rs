//! Transport that writes messages to the log instead of sending them.
//!
//! Used when no SMTP server is configured, so the booking flow behaves the
//! same in development.

use async_trait::async_trait;

use super::{MailError, MailTransport};
use crate::message::MailMessage;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogDelivery;

#[async_trait]
impl MailTransport for LogDelivery {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            bytes = message.content.len(),
            "Mail not sent (SMTP not configured)",
        );
        Ok(())
    }
}
