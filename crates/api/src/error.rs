use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookings_core::error::CoreError;

use crate::views::{self, ErrorPage, PageContext};

/// Failure of a handler that is not handled by a flash-and-redirect.
///
/// Rendered as the shared HTML error page; the visitor sees a safe message
/// and the details go to the log.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The session store failed to load or save.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Malformed path or form input.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

const GENERIC_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// Status code and the message safe to show a visitor.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Session(err) => {
                tracing::error!(error = %err, "Session store error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let page = ErrorPage { status, message };
        (status, views::render(&PageContext::default(), &page)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Statement timeouts (`57014`) and everything else map to 500 with a
///   sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        return (
                            StatusCode::CONFLICT,
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                }
                // statement_timeout exceeded
                Some("57014") => {
                    tracing::error!(error = %db_err, "Database query timed out");
                    return (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string());
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
        }
        sqlx::Error::PoolTimedOut => {
            tracing::error!("Timed out waiting for a database connection");
            (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let missing = AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id: 9,
        });
        assert_eq!(
            missing.status_and_message(),
            (StatusCode::NOT_FOUND, "Reservation with id 9 not found".to_string())
        );

        let denied = AppError::Core(CoreError::Unauthorized("Invalid login credentials".into()));
        assert_eq!(denied.status_and_message().0, StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::BadRequest("Unknown reservation list 'x'".into()).status_and_message().0,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_details_are_not_shown() {
        let (status, message) = AppError::InternalError("pool exploded".into()).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, GENERIC_MESSAGE);

        let (status, message) = AppError::Database(sqlx::Error::PoolTimedOut).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, GENERIC_MESSAGE);
    }

    #[test]
    fn missing_row_is_not_found() {
        let (status, _) = AppError::Database(sqlx::Error::RowNotFound).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
