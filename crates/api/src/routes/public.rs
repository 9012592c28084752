//! Route definitions for the visitor pages and the booking flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{availability, pages, reservation};
use crate::state::AppState;

/// Routes mounted at `/`.
///
/// ```text
/// GET       /                          -> home
/// GET       /about                     -> about
/// GET       /generals-quarters         -> generals_quarters
/// GET       /majors-suite              -> majors_suite
/// GET       /contact                   -> contact
/// GET/POST  /search-availability       -> search_form / search
/// POST      /search-availability-json  -> search_json
/// GET       /choose-room/{id}          -> choose_room
/// GET       /book-room                 -> book_room
/// GET/POST  /make-reservation          -> form / submit
/// GET       /reservation-summary       -> summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/generals-quarters", get(pages::generals_quarters))
        .route("/majors-suite", get(pages::majors_suite))
        .route("/contact", get(pages::contact))
        .route(
            "/search-availability",
            get(availability::search_form).post(availability::search),
        )
        .route("/search-availability-json", post(availability::search_json))
        .route("/choose-room/{id}", get(availability::choose_room))
        .route("/book-room", get(availability::book_room))
        .route(
            "/make-reservation",
            get(reservation::form).post(reservation::submit),
        )
        .route("/reservation-summary", get(reservation::summary))
}
