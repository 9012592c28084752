//! Repository for the `reservations` table.
//!
//! Every read joins `rooms` so the listing and detail pages can show the
//! room name without a second query.

use sqlx::{PgExecutor, PgPool};
use bookings_core::forms::GuestDetails;
use bookings_core::types::DbId;

use crate::models::reservation::{CreateReservation, Reservation};
use crate::models::status::ProcessedStatus;

/// Columns selected from `reservations r JOIN rooms rm`.
const COLUMNS: &str = "r.id, r.first_name, r.last_name, r.email, r.phone, \
                       r.start_date, r.end_date, r.room_id, r.processed, \
                       r.created_at, r.updated_at, rm.room_name";

/// Provides CRUD operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a reservation, returning the created row.
    ///
    /// Generic over the executor so the booking writer can run it inside its
    /// transaction.
    pub async fn create<'e, E>(executor: E, input: &CreateReservation) -> Result<Reservation, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "WITH r AS (
                 INSERT INTO reservations
                     (first_name, last_name, email, phone, start_date, end_date, room_id)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING *
             )
             SELECT {COLUMNS} FROM r JOIN rooms rm ON rm.id = r.room_id"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(&input.guest.first_name)
            .bind(&input.guest.last_name)
            .bind(&input.guest.email)
            .bind(&input.guest.phone)
            .bind(input.dates.start())
            .bind(input.dates.end())
            .bind(input.room_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations r JOIN rooms rm ON rm.id = r.room_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every reservation, by start date ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations r JOIN rooms rm ON rm.id = r.room_id
             ORDER BY r.start_date ASC, r.id ASC"
        );
        sqlx::query_as::<_, Reservation>(&query).fetch_all(pool).await
    }

    /// Reservations not yet marked processed, by start date ascending.
    pub async fn list_new(pool: &PgPool) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations r JOIN rooms rm ON rm.id = r.room_id
             WHERE r.processed = $1
             ORDER BY r.start_date ASC, r.id ASC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(ProcessedStatus::New.id())
            .fetch_all(pool)
            .await
    }

    /// Overwrite the guest identity fields. Dates and room are not editable.
    ///
    /// Returns `true` if the row existed.
    pub async fn update_guest(
        pool: &PgPool,
        id: DbId,
        guest: &GuestDetails,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reservations
             SET first_name = $2, last_name = $3, email = $4, phone = $5, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&guest.first_name)
        .bind(&guest.last_name)
        .bind(&guest.email)
        .bind(&guest.phone)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a reservation. Its room restriction goes with it via
    /// `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the processed flag.
    ///
    /// Returns `true` if the row existed.
    pub async fn set_processed(
        pool: &PgPool,
        id: DbId,
        status: ProcessedStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reservations SET processed = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
