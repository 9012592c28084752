pub mod admin;
pub mod auth;
pub mod availability;
pub mod pages;
pub mod reservation;

use axum::response::{IntoResponse, Redirect, Response};

use crate::error::AppResult;
use crate::session::AppSession;

/// Shown to a visitor whose booking step failed on a database call.
pub const DATABASE_FAILED: &str = "Error querying database";

/// Drop the visitor's draft and send them home with an error notice.
///
/// Used when a database call fails part way through the booking flow; the
/// caller logs the failure itself.
pub(crate) async fn abandon_booking(session: &AppSession, message: &str) -> AppResult<Response> {
    session.take_draft().await?;
    session.error(message).await?;
    Ok(Redirect::temporary("/").into_response())
}
