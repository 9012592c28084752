//! Room entity model.

use serde::Serialize;
use sqlx::FromRow;
use bookings_core::types::{DbId, Timestamp};

/// A row from the `rooms` table. Reference data, seeded by migration.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub room_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
