//! SMTP transport for booking mail, built on `lettre`.
//!
//! Without `SMTP_HOST` there is no [`EmailConfig`] and the binary falls back
//! to [`LogDelivery`](super::log::LogDelivery).

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, MailTransport};
use crate::message::MailMessage;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Submission port.
const SUBMISSION_PORT: u16 = 587;

/// Where and how to relay booking mail.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Upgrade the connection with STARTTLS. Off for local catch-all servers.
    pub starttls: bool,
    /// Credentials are only sent when both are present.
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Read the relay settings; `None` when `SMTP_HOST` is absent.
    ///
    /// | Variable         | Required | Default |
    /// |------------------|----------|---------|
    /// | `SMTP_HOST`      | yes      | unset   |
    /// | `SMTP_PORT`      | no       | `587`   |
    /// | `SMTP_STARTTLS`  | no       | `true`  |
    /// | `SMTP_USER`      | no       | unset   |
    /// | `SMTP_PASSWORD`  | no       | unset   |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(SUBMISSION_PORT),
            starttls: std::env::var("SMTP_STARTTLS")
                .map(|v| v != "false")
                .unwrap_or(true),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// SMTP relay client. Its connection pool is shared by every send.
pub struct EmailDelivery {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        }
        .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
        })
    }
}

/// Assemble the MIME message for `message`.
fn build_message(message: &MailMessage) -> Result<Message, MailError> {
    Message::builder()
        .from(message.from.parse()?)
        .to(message.to.parse()?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(message.content.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for EmailDelivery {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let email = build_message(message)?;
        self.mailer.send(email).await?;
        tracing::info!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
