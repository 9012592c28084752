pub mod admin;
pub mod health;
pub mod public;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health                 health check (JSON)
/// /...                    visitor pages and booking flow
/// /user/...               login, logout
/// /admin/...              administrator pages
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(public::router())
        .nest("/user", user::router())
        .nest("/admin", admin::router())
}
