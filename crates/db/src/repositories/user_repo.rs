//! Administrator accounts. There is no registration flow: rows come from the
//! startup bootstrap or are inserted by hand.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, first_name, last_name, email, password_hash, access_level, \
                       created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Fails with a `uq_users_email` violation if the email is taken.
    pub async fn create(pool: &PgPool, account: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, email, password_hash, access_level)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.email.trim())
            .bind(&account.password_hash)
            .bind(account.access_level)
            .fetch_one(pool)
            .await
    }

    /// Login lookup. Surrounding whitespace in the typed email is ignored.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }
}
