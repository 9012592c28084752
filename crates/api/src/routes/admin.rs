use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires a logged-in administrator.
///
/// ```text
/// GET       /dashboard                          -> dashboard
/// GET       /reservations-new                   -> list_new
/// GET       /reservations-all                   -> list_all
/// GET/POST  /reservations/{src}/{id}            -> show / update
/// POST      /process-reservation/{src}/{id}     -> process
/// POST      /delete-reservation/{src}/{id}      -> delete
/// GET/POST  /reservations-calendar              -> calendar / calendar_submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/reservations-new", get(admin::list_new))
        .route("/reservations-all", get(admin::list_all))
        .route(
            "/reservations/{src}/{id}",
            get(admin::show).post(admin::update),
        )
        .route("/process-reservation/{src}/{id}", post(admin::process))
        .route("/delete-reservation/{src}/{id}", post(admin::delete))
        .route(
            "/reservations-calendar",
            get(admin::calendar).post(admin::calendar_submit),
        )
}
