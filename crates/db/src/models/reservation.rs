//! Reservation entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use bookings_core::dates::DateRange;
use bookings_core::forms::GuestDetails;
use bookings_core::types::{DbId, Timestamp};

use super::status::{ProcessedStatus, StatusId};

/// A row from the `reservations` table joined with its room's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub room_id: DbId,
    pub processed: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub room_name: String,
}

impl Reservation {
    /// Unknown codes read as `New`, the state that still needs attention.
    pub fn status(&self) -> ProcessedStatus {
        ProcessedStatus::from_id(self.processed).unwrap_or(ProcessedStatus::New)
    }

    pub fn is_processed(&self) -> bool {
        self.status() == ProcessedStatus::Processed
    }

    pub fn guest(&self) -> GuestDetails {
        GuestDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// DTO for inserting a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub guest: GuestDetails,
    pub dates: DateRange,
    pub room_id: DbId,
}
