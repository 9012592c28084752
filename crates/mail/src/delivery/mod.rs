//! Mail transports.
//!
//! The worker only sees [`MailTransport`]; `main` picks SMTP when
//! `SMTP_HOST` is configured and the logging transport otherwise.

pub mod email;
pub mod log;

use async_trait::async_trait;

use crate::message::MailMessage;

/// Error type for mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Something that can deliver a [`MailMessage`].
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}
