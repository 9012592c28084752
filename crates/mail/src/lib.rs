//! Outbound mail for the bookings application.
//!
//! - [`MailMessage`]: one outbound email.
//! - [`MailQueue`]: bounded, non-blocking hand-off from request handlers.
//! - [`MailWorker`]: background task draining the queue into a transport.
//! - [`delivery`]: transports (SMTP via `lettre`, or a logging fallback).

pub mod delivery;
pub mod message;
pub mod queue;
pub mod worker;

pub use delivery::email::{EmailConfig, EmailDelivery};
pub use delivery::log::LogDelivery;
pub use delivery::{MailError, MailTransport};
pub use message::MailMessage;
pub use queue::{MailQueue, MailQueueError};
pub use worker::MailWorker;
