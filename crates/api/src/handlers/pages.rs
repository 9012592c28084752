//! Handlers for the static visitor pages.

use axum::response::Html;

use crate::error::AppResult;
use crate::session::AppSession;
use crate::views::{self, AboutPage, ContactPage, HomePage, RoomPage};

/// GET /
pub async fn home(session: AppSession) -> AppResult<Html<String>> {
    Ok(views::render(&session.page_context().await?, &HomePage))
}

/// GET /about
pub async fn about(session: AppSession) -> AppResult<Html<String>> {
    Ok(views::render(&session.page_context().await?, &AboutPage))
}

/// GET /generals-quarters
pub async fn generals_quarters(session: AppSession) -> AppResult<Html<String>> {
    Ok(views::render(
        &session.page_context().await?,
        &RoomPage::generals_quarters(),
    ))
}

/// GET /majors-suite
pub async fn majors_suite(session: AppSession) -> AppResult<Html<String>> {
    Ok(views::render(&session.page_context().await?, &RoomPage::majors_suite()))
}

/// GET /contact
pub async fn contact(session: AppSession) -> AppResult<Html<String>> {
    Ok(views::render(&session.page_context().await?, &ContactPage))
}
