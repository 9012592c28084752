//! Administrator authentication.

pub mod password;

use bookings_core::error::CoreError;
use bookings_core::types::DbId;
use bookings_db::models::user::CreateUser;
use bookings_db::repositories::UserRepo;
use bookings_db::DbPool;

use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};
use password::{hash_password, verify_decoy, verify_password};

/// Shown for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// Access level given to the bootstrapped administrator.
pub const ADMIN_ACCESS_LEVEL: i32 = 3;

/// Check an email/password pair, returning the user's id and stored hash.
///
/// An unknown email, an unreadable hash, and a wrong password all fail with
/// the same [`INVALID_CREDENTIALS`] error.
pub async fn authenticate(pool: &DbPool, email: &str, password: &str) -> AppResult<(DbId, String)> {
    let invalid = || AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));

    let Some(user) = UserRepo::find_by_email(pool, email).await? else {
        verify_decoy(password);
        tracing::info!(email, "Login attempt for unknown email");
        return Err(invalid());
    };

    match verify_password(password, &user.password_hash) {
        Ok(true) => Ok((user.id, user.password_hash)),
        Ok(false) => {
            tracing::info!(user_id = user.id, "Login attempt with wrong password");
            Err(invalid())
        }
        Err(e) => {
            tracing::warn!(user_id = user.id, error = %e, "Stored password hash is malformed");
            Err(invalid())
        }
    }
}

/// Create the configured administrator if no user has that email yet.
///
/// Returns `true` if a user was created.
pub async fn bootstrap_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    if UserRepo::find_by_email(pool, &admin.email).await?.is_some() {
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash admin password: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Admin".into(),
            last_name: "User".into(),
            email: admin.email.clone(),
            password_hash,
            access_level: ADMIN_ACCESS_LEVEL,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, email = %user.email, "Bootstrapped administrator account");
    Ok(true)
}
