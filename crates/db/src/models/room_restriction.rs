//! Room restriction entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use bookings_core::calendar::RestrictionSpan;
use bookings_core::dates::DateRange;
use bookings_core::types::{DbId, Timestamp};

use super::status::{RestrictionKind, StatusId};

/// A row from the `room_restrictions` table.
///
/// `reservation_id` is `None` for a manual owner block.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoomRestriction {
    pub id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub room_id: DbId,
    pub reservation_id: Option<DbId>,
    pub restriction_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RoomRestriction {
    /// Calendar view of the row. `None` only if the stored range is inverted,
    /// which the table's check constraint rules out.
    pub fn span(&self) -> Option<RestrictionSpan> {
        DateRange::new(self.start_date, self.end_date)
            .ok()
            .map(|dates| RestrictionSpan {
                id: self.id,
                dates,
                reservation_id: self.reservation_id,
            })
    }
}

/// DTO for inserting a room restriction.
#[derive(Debug, Clone)]
pub struct CreateRoomRestriction {
    pub dates: DateRange,
    pub room_id: DbId,
    pub reservation_id: Option<DbId>,
    pub kind: RestrictionKind,
}

impl CreateRoomRestriction {
    /// The restriction row that accompanies a reservation.
    pub fn for_reservation(reservation_id: DbId, room_id: DbId, dates: DateRange) -> Self {
        Self {
            dates,
            room_id,
            reservation_id: Some(reservation_id),
            kind: RestrictionKind::Reservation,
        }
    }

    /// A one-night owner block on `day`.
    pub fn block(room_id: DbId, day: NaiveDate) -> Self {
        Self {
            dates: DateRange::single_day(day),
            room_id,
            reservation_id: None,
            kind: RestrictionKind::OwnerBlock,
        }
    }
}
