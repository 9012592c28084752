//! Handlers for administrator login and logout.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use bookings_core::error::CoreError;
use bookings_core::forms::{Credentials, FormErrors};

use crate::auth::{self, INVALID_CREDENTIALS};
use crate::error::{AppError, AppResult};
use crate::session::AppSession;
use crate::state::AppState;
use crate::views::{self, LoginPage};

/// GET /user/login
pub async fn login_form(session: AppSession) -> AppResult<Html<String>> {
    let page = LoginPage {
        email: String::new(),
        errors: FormErrors::default(),
    };
    Ok(views::render(&session.page_context().await?, &page))
}

/// POST /user/login
///
/// On success the session id is renewed before the user id is stored.
pub async fn login(
    State(state): State<AppState>,
    session: AppSession,
    Form(credentials): Form<Credentials>,
) -> AppResult<Response> {
    let errors = credentials.check();
    if !errors.is_empty() {
        let page = LoginPage {
            email: credentials.email,
            errors,
        };
        return Ok(views::render(&session.page_context().await?, &page).into_response());
    }

    match auth::authenticate(&state.pool, &credentials.email, &credentials.password).await {
        Ok((user_id, _)) => {
            session.log_in(user_id).await?;
            session.flash("Logged in successfully").await?;
            tracing::info!(user_id, "Administrator logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::Core(CoreError::Unauthorized(_))) => {
            session.error(INVALID_CREDENTIALS).await?;
            Ok(Redirect::to("/user/login").into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /user/logout
pub async fn logout(session: AppSession) -> AppResult<Redirect> {
    session.log_out().await?;
    Ok(Redirect::to("/user/login"))
}
