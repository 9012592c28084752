//! Availability queries over the room restriction table.

use bookings_core::dates::DateRange;
use bookings_core::types::DbId;

use crate::models::room::Room;
use crate::repositories::{RoomRepo, RoomRestrictionRepo};
use crate::DbPool;

/// Result of searching every room for a date range.
#[derive(Debug, Clone)]
pub enum Availability {
    /// At least one room is free; ordered by room id.
    Available(Vec<Room>),
    NoneAvailable,
}

/// Rooms with no restriction overlapping `dates`.
pub async fn search_all_rooms(pool: &DbPool, dates: DateRange) -> Result<Availability, sqlx::Error> {
    let rooms = RoomRepo::list_available(pool, dates).await?;
    tracing::debug!(
        start = %dates.start(),
        end = %dates.end(),
        count = rooms.len(),
        "Searched availability for all rooms",
    );
    if rooms.is_empty() {
        Ok(Availability::NoneAvailable)
    } else {
        Ok(Availability::Available(rooms))
    }
}

/// Whether `room_id` is free for the whole of `dates`.
pub async fn is_room_available(
    pool: &DbPool,
    room_id: DbId,
    dates: DateRange,
) -> Result<bool, sqlx::Error> {
    RoomRestrictionRepo::is_room_available(pool, room_id, dates).await
}
