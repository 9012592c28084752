use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use bookings_db::repositories::RoomRepo;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    /// Bookable rooms, when the database answers.
    pub rooms: Option<usize>,
    /// Mail messages waiting for the worker.
    pub mail_backlog: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let rooms = match RoomRepo::list(&state.pool).await {
        Ok(rooms) => Some(rooms.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };

    Json(HealthReport {
        status: if rooms.is_some() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: rooms.is_some(),
        rooms,
        mail_backlog: state.mail.backlog(),
    })
}

/// `GET /health`. Takes no session extractor, though the session layer still wraps it.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
