//! User repository for login lookups.
//!
//! # Security
//!
//! Passwords are stored and compared in plaintext, and an unknown email is
//! indistinguishable from a wrong password. Both are existing properties of
//! the `users` table this service reads; they are flagged here, not changed.

use sqlx::PgPool;

use orderdesk_core::{UserId, UserSummary};

use super::StoreError;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find the user whose email and password both match exactly.
    ///
    /// A `None` argument binds SQL `NULL`, which never matches. The `id`
    /// column may be any integer type and `name` may be `NULL`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn find_by_credentials(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Option<UserSummary>, StoreError> {
        let row = sqlx::query_as::<_, (UserId, Option<String>)>(
            "SELECT id, name FROM users WHERE email = $1 AND password = $2",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, name)| UserSummary { id, name }))
    }

    /// Create a user and return its ID.
    ///
    /// The HTTP surface never creates users; this backs `od-cli user create`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails (e.g. duplicate email).
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, StoreError> {
        let id = sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(password)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
