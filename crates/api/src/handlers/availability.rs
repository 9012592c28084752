//! Handlers for searching availability and picking a room.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use bookings_core::booking::ReservationDraft;
use bookings_core::dates::{format_date, DateRange};
use bookings_core::types::DbId;
use bookings_db::availability::{self, Availability};
use bookings_db::repositories::RoomRepo;

use super::{abandon_booking, DATABASE_FAILED};
use crate::error::AppResult;
use crate::session::AppSession;
use crate::state::AppState;
use crate::views::{self, ChooseRoomPage, SearchPage};

pub const NO_AVAILABILITY: &str = "No availability";
pub const NO_DRAFT: &str = "Can't get reservation from session";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoomSearchForm {
    pub start: String,
    pub end: String,
    pub room_id: String,
}

/// Response of the per-room availability check used by the room pages.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub ok: bool,
    pub message: String,
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct BookRoomQuery {
    pub id: DbId,
    pub s: String,
    pub e: String,
}

/// GET /search-availability
pub async fn search_form(session: AppSession) -> AppResult<Html<String>> {
    Ok(views::render(&session.page_context().await?, &SearchPage))
}

/// POST /search-availability
///
/// Renders the choose-room page when at least one room is free and stores a
/// fresh draft for the searched dates.
pub async fn search(
    State(state): State<AppState>,
    session: AppSession,
    Form(form): Form<SearchForm>,
) -> AppResult<Response> {
    let dates = match DateRange::parse_stay(&form.start, &form.end) {
        Ok(dates) => dates,
        Err(e) => {
            session.error(e.to_string()).await?;
            return Ok(Redirect::to("/search-availability").into_response());
        }
    };

    let rooms = match availability::search_all_rooms(&state.pool, dates).await {
        Ok(Availability::Available(rooms)) => rooms,
        Ok(Availability::NoneAvailable) => {
            session.error(NO_AVAILABILITY).await?;
            return Ok(Redirect::to("/search-availability").into_response());
        }
        Err(e) => {
            tracing::error!(error = %e, "Availability search failed");
            return abandon_booking(&session, DATABASE_FAILED).await;
        }
    };

    session.set_draft(ReservationDraft::new(dates)).await?;
    let page = ChooseRoomPage { dates, rooms };
    Ok(views::render(&session.page_context().await?, &page).into_response())
}

/// POST /search-availability-json
pub async fn search_json(
    State(state): State<AppState>,
    Form(form): Form<RoomSearchForm>,
) -> Json<AvailabilityResponse> {
    let reply = |ok: bool, message: &str| {
        Json(AvailabilityResponse {
            ok,
            message: message.to_string(),
            room_id: form.room_id.clone(),
            start_date: form.start.clone(),
            end_date: form.end.clone(),
        })
    };

    let dates = match DateRange::parse_stay(&form.start, &form.end) {
        Ok(dates) => dates,
        Err(e) => return reply(false, &e.to_string()),
    };
    let Ok(room_id) = form.room_id.trim().parse::<DbId>() else {
        return reply(false, "Invalid room id");
    };

    match availability::is_room_available(&state.pool, room_id, dates).await {
        Ok(true) => reply(true, "Available"),
        Ok(false) => reply(false, "Unavailable"),
        Err(e) => {
            tracing::error!(error = %e, room_id, "Availability check failed");
            reply(false, DATABASE_FAILED)
        }
    }
}

/// GET /choose-room/{id}
pub async fn choose_room(
    State(state): State<AppState>,
    session: AppSession,
    Path(room_id): Path<DbId>,
) -> AppResult<Response> {
    let Some(mut draft) = session.draft().await? else {
        session.error(NO_DRAFT).await?;
        return Ok(Redirect::to("/").into_response());
    };

    let room = match RoomRepo::find_by_id(&state.pool, room_id).await {
        Ok(Some(room)) => room,
        Ok(None) => {
            session.error("Room not found").await?;
            return Ok(Redirect::to("/search-availability").into_response());
        }
        Err(e) => {
            tracing::error!(error = %e, room_id, "Failed to load chosen room");
            return abandon_booking(&session, DATABASE_FAILED).await;
        }
    };

    draft.choose_room(room.id, room.room_name);
    session.set_draft(draft).await?;
    Ok(Redirect::to("/make-reservation").into_response())
}

/// GET /book-room?id=&s=&e=
///
/// Starts a booking for a room the visitor already checked from its room page.
pub async fn book_room(
    State(state): State<AppState>,
    session: AppSession,
    Query(query): Query<BookRoomQuery>,
) -> AppResult<Response> {
    let dates = match DateRange::parse_stay(&query.s, &query.e) {
        Ok(dates) => dates,
        Err(e) => {
            session.error(e.to_string()).await?;
            return Ok(Redirect::to("/search-availability").into_response());
        }
    };

    let room = match RoomRepo::find_by_id(&state.pool, query.id).await {
        Ok(Some(room)) => room,
        Ok(None) => {
            session.error("Room not found").await?;
            return Ok(Redirect::to("/search-availability").into_response());
        }
        Err(e) => {
            tracing::error!(error = %e, room_id = query.id, "Failed to load room for booking link");
            return abandon_booking(&session, DATABASE_FAILED).await;
        }
    };

    tracing::debug!(
        room_id = room.id,
        start = %format_date(dates.start()),
        end = %format_date(dates.end()),
        "Booking started from room page",
    );
    session
        .set_draft(ReservationDraft::for_room(dates, room.id, room.room_name))
        .await?;
    Ok(Redirect::to("/make-reservation").into_response())
}
