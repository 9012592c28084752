//! Repository for the `room_restrictions` table.

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};
use bookings_core::dates::DateRange;
use bookings_core::types::DbId;

use crate::models::room_restriction::{CreateRoomRestriction, RoomRestriction};
use crate::models::status::RestrictionKind;

const COLUMNS: &str = "id, start_date, end_date, room_id, reservation_id, restriction_id, \
                       created_at, updated_at";

/// Provides operations on room restrictions (reservations and owner blocks).
pub struct RoomRestrictionRepo;

impl RoomRestrictionRepo {
    /// Insert a restriction, returning the created row.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateRoomRestriction,
    ) -> Result<RoomRestriction, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO room_restrictions
                 (start_date, end_date, room_id, reservation_id, restriction_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoomRestriction>(&query)
            .bind(input.dates.start())
            .bind(input.dates.end())
            .bind(input.room_id)
            .bind(input.reservation_id)
            .bind(input.kind.id())
            .fetch_one(executor)
            .await
    }

    /// Whether no restriction on `room_id` overlaps `dates` (half-open).
    pub async fn is_room_available<'e, E>(
        executor: E,
        room_id: DbId,
        dates: DateRange,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let overlapping: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM room_restrictions
             WHERE room_id = $1 AND $2 < end_date AND $3 > start_date",
        )
        .bind(room_id)
        .bind(dates.start())
        .bind(dates.end())
        .fetch_one(executor)
        .await?;
        Ok(overlapping == 0)
    }

    /// Restrictions on `room_id` overlapping `window`, by start date.
    pub async fn list_for_room_in_range(
        pool: &PgPool,
        room_id: DbId,
        window: DateRange,
    ) -> Result<Vec<RoomRestriction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM room_restrictions
             WHERE room_id = $1 AND $2 < end_date AND $3 > start_date
             ORDER BY start_date, id"
        );
        sqlx::query_as::<_, RoomRestriction>(&query)
            .bind(room_id)
            .bind(window.start())
            .bind(window.end())
            .fetch_all(pool)
            .await
    }

    /// Add a one-night owner block on `day`.
    pub async fn create_block(
        pool: &PgPool,
        room_id: DbId,
        day: NaiveDate,
    ) -> Result<RoomRestriction, sqlx::Error> {
        Self::create(pool, &CreateRoomRestriction::block(room_id, day)).await
    }

    /// Delete an owner block. Rows belonging to a reservation are never
    /// touched here.
    ///
    /// Returns `true` if a block was deleted.
    pub async fn delete_block(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM room_restrictions
             WHERE id = $1 AND reservation_id IS NULL AND restriction_id = $2",
        )
        .bind(id)
        .bind(RestrictionKind::OwnerBlock.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
