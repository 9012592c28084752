//! Transactional reservation writer.
//!
//! A reservation and the room restriction that blocks its dates are written
//! together or not at all. The room row is locked first, so two requests for
//! overlapping stays in the same room serialize and the second one sees the
//! first one's restriction when it re-checks availability.

use crate::models::reservation::{CreateReservation, Reservation};
use crate::models::room_restriction::CreateRoomRestriction;
use crate::repositories::{ReservationRepo, RoomRepo, RoomRestrictionRepo};
use crate::DbPool;

/// What happened to a booking attempt that did not hit a database error.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Booked(Reservation),
    /// Another restriction overlaps the requested dates; nothing was written.
    Unavailable,
    /// The room id does not exist; nothing was written.
    RoomNotFound,
    /// The stay covers no nights; nothing was written.
    EmptyStay,
}

/// Persist a reservation and its restriction in one transaction.
///
/// Any error after the transaction begins drops it unfinished, which rolls
/// back everything written so far.
pub async fn book_room(pool: &DbPool, input: &CreateReservation) -> Result<BookingOutcome, sqlx::Error> {
    if input.dates.is_empty() {
        return Ok(BookingOutcome::EmptyStay);
    }

    let mut tx = pool.begin().await?;

    if RoomRepo::lock_for_update(&mut *tx, input.room_id).await?.is_none() {
        return Ok(BookingOutcome::RoomNotFound);
    }

    if !RoomRestrictionRepo::is_room_available(&mut *tx, input.room_id, input.dates).await? {
        tracing::info!(
            room_id = input.room_id,
            start = %input.dates.start(),
            end = %input.dates.end(),
            "Room no longer available at booking time",
        );
        return Ok(BookingOutcome::Unavailable);
    }

    let reservation = ReservationRepo::create(&mut *tx, input).await?;
    RoomRestrictionRepo::create(
        &mut *tx,
        &CreateRoomRestriction::for_reservation(reservation.id, input.room_id, input.dates),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        reservation_id = reservation.id,
        room_id = reservation.room_id,
        "Reservation booked",
    );
    Ok(BookingOutcome::Booked(reservation))
}
