//! Persistence layer: connection pool, migrations, row models, repositories,
//! and the two database-bound services built on them (availability search and
//! the transactional reservation writer).

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod availability;
pub mod booking;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Upper bound on open connections.
pub const MAX_CONNECTIONS: u32 = 10;

/// Bound on every statement and on waiting for a pooled connection.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Connections are recycled after this long, and idle ones closed after it.
pub const CONNECTION_LIFETIME: Duration = Duration::from_secs(5 * 60);

/// Create a connection pool from a database URL.
///
/// Each connection carries a server-side `statement_timeout` of
/// [`QUERY_TIMEOUT`], so a slow query fails with a database error instead of
/// holding the request.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?.options([(
        "statement_timeout",
        QUERY_TIMEOUT.as_millis().to_string(),
    )]);

    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(QUERY_TIMEOUT)
        .idle_timeout(CONNECTION_LIFETIME)
        .max_lifetime(CONNECTION_LIFETIME)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
