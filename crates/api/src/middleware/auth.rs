//! Session-based administrator extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use bookings_core::types::DbId;

use crate::session::AppSession;

/// Notice shown when an anonymous visitor opens an admin page.
pub const LOGIN_REQUIRED: &str = "Log in first!";

/// Authenticated administrator taken from the session.
///
/// Use this as an extractor parameter in every `/admin` handler. Anonymous
/// requests are redirected to the login page with an error notice instead of
/// reaching the handler.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser {
    pub user_id: DbId,
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = AppSession::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session.user_id().await {
            Ok(Some(user_id)) => Ok(AdminUser { user_id }),
            Ok(None) => {
                if let Err(e) = session.error(LOGIN_REQUIRED).await {
                    return Err(e.into_response());
                }
                Err(Redirect::to("/user/login").into_response())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}
