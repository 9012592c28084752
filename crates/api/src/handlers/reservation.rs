//! Handlers for the guest details form and the booking summary.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use bookings_core::booking::{BookingStage, ReservationDraft};
use bookings_core::forms::{FormErrors, GuestDetails};
use bookings_db::booking::{self, BookingOutcome};
use bookings_db::models::reservation::CreateReservation;
use bookings_db::repositories::RoomRepo;

use super::availability::NO_DRAFT;
use super::{abandon_booking, DATABASE_FAILED};
use crate::error::AppResult;
use crate::notifications;
use crate::session::AppSession;
use crate::state::AppState;
use crate::views::{self, MakeReservationPage, SummaryPage};

pub const ROOM_UNAVAILABLE: &str = "Sorry, that room is no longer available for those dates";
pub const BOOKING_FAILED: &str = "Can't insert reservation into database!";
pub const EMPTY_STAY: &str = "A stay must be at least one night";

/// A draft at the room-chosen stage, or the redirect to send instead.
async fn chosen_draft(session: &AppSession) -> AppResult<Result<ReservationDraft, Response>> {
    let draft = session.draft().await?;
    match (BookingStage::of(draft.as_ref()), draft) {
        (BookingStage::RoomChosen, Some(draft)) => Ok(Ok(draft)),
        (BookingStage::Confirmed, _) => {
            Ok(Err(Redirect::to("/reservation-summary").into_response()))
        }
        _ => {
            session.error(NO_DRAFT).await?;
            Ok(Err(Redirect::temporary("/").into_response()))
        }
    }
}

fn form_page(draft: &ReservationDraft, guest: GuestDetails, errors: FormErrors) -> MakeReservationPage {
    MakeReservationPage {
        room_name: draft.room.as_ref().map(|r| r.name.clone()).unwrap_or_default(),
        dates: draft.dates,
        guest,
        errors,
    }
}

/// GET /make-reservation
pub async fn form(State(state): State<AppState>, session: AppSession) -> AppResult<Response> {
    let draft = match chosen_draft(&session).await? {
        Ok(draft) => draft,
        Err(redirect) => return Ok(redirect),
    };

    let room_id = draft.room_id().unwrap_or_default();
    match RoomRepo::find_by_id(&state.pool, room_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return abandon_booking(&session, "Can't find room!").await,
        Err(e) => {
            tracing::error!(error = %e, room_id, "Failed to load room for reservation form");
            return abandon_booking(&session, DATABASE_FAILED).await;
        }
    }

    let page = form_page(&draft, draft.guest.clone(), FormErrors::default());
    Ok(views::render(&session.page_context().await?, &page).into_response())
}

/// POST /make-reservation
///
/// Dates and room come from the session draft; only guest fields are read
/// from the form.
pub async fn submit(
    State(state): State<AppState>,
    session: AppSession,
    Form(guest): Form<GuestDetails>,
) -> AppResult<Response> {
    let mut draft = match chosen_draft(&session).await? {
        Ok(draft) => draft,
        Err(redirect) => return Ok(redirect),
    };

    let errors = guest.check();
    if !errors.is_empty() {
        let page = form_page(&draft, guest, errors);
        return Ok(views::render(&session.page_context().await?, &page).into_response());
    }

    let input = CreateReservation {
        guest: guest.clone(),
        dates: draft.dates,
        room_id: draft.room_id().unwrap_or_default(),
    };

    match booking::book_room(&state.pool, &input).await {
        Ok(BookingOutcome::Booked(reservation)) => {
            notifications::send_booking_emails(&state, &reservation);
            draft.confirm(guest, reservation.id);
            session.set_draft(draft).await?;
            session.flash("Reservation submitted").await?;
            Ok(Redirect::to("/reservation-summary").into_response())
        }
        Ok(BookingOutcome::Unavailable) => {
            session.take_draft().await?;
            session.error(ROOM_UNAVAILABLE).await?;
            Ok(Redirect::to("/search-availability").into_response())
        }
        Ok(BookingOutcome::EmptyStay) => {
            session.take_draft().await?;
            session.error(EMPTY_STAY).await?;
            Ok(Redirect::to("/search-availability").into_response())
        }
        Ok(BookingOutcome::RoomNotFound) => abandon_booking(&session, "Can't find room!").await,
        Err(e) => {
            tracing::error!(error = %e, room_id = input.room_id, "Failed to book reservation");
            abandon_booking(&session, BOOKING_FAILED).await
        }
    }
}

/// GET /reservation-summary
///
/// Shows the confirmed draft once and removes it from the session.
pub async fn summary(session: AppSession) -> AppResult<Response> {
    let draft = session.draft().await?;
    let draft = match (BookingStage::of(draft.as_ref()), draft) {
        (BookingStage::Confirmed, Some(draft)) => draft,
        _ => {
            session.error(NO_DRAFT).await?;
            return Ok(Redirect::temporary("/").into_response());
        }
    };

    session.take_draft().await?;
    let page = SummaryPage { draft };
    Ok(views::render(&session.page_context().await?, &page).into_response())
}
