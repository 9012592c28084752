use std::sync::Arc;

use bookings_mail::MailQueue;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bookings_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Hand-off to the background mail worker.
    pub mail: MailQueue,
}
