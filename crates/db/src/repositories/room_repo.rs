//! Repository for the `rooms` table.

use sqlx::{PgExecutor, PgPool};
use bookings_core::dates::DateRange;
use bookings_core::types::DbId;

use crate::models::room::Room;

const COLUMNS: &str = "id, room_name, created_at, updated_at";

/// Read access to rooms. Rooms are seeded by migration and never written here.
pub struct RoomRepo;

impl RoomRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All rooms ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY id");
        sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
    }

    /// Every room with no restriction overlapping `dates`, ordered by id.
    ///
    /// Overlap is half-open: a restriction ending on `dates.start()` does not
    /// count.
    pub async fn list_available(pool: &PgPool, dates: DateRange) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rooms r
             WHERE NOT EXISTS (
                 SELECT 1 FROM room_restrictions rr
                 WHERE rr.room_id = r.id
                   AND $1 < rr.end_date
                   AND $2 > rr.start_date
             )
             ORDER BY r.id"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(dates.start())
            .bind(dates.end())
            .fetch_all(pool)
            .await
    }

    /// Lock a room row for the rest of the enclosing transaction.
    ///
    /// Concurrent writers booking the same room queue behind this lock, so an
    /// availability check made after it cannot be invalidated before commit.
    pub async fn lock_for_update<'e, E>(executor: E, id: DbId) -> Result<Option<Room>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
