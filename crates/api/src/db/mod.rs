//! Data store gateway for the Order Desk `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `product_catalog` - Product catalog (schema owned elsewhere, read-only here)
//! - `orders` - Placed orders, one row per successful `POST /place-order`
//! - `users` - Login accounts (plaintext passwords, see [`users`])
//!
//! Every gateway call acquires its own pooled connection and returns it on
//! drop, so a connection is released on every exit path, including errors.
//! Writes run in their own transaction.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p orderdesk-cli -- migrate
//! ```

pub mod orders;
pub mod products;
pub mod row;
pub mod users;

use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use orderdesk_core::Row;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Failure talking to or executing against the store.
///
/// The message is the driver's own text; it is not classified further.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StoreError(#[from] sqlx::Error);

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create a pool that does not connect until the first query.
///
/// `acquire_timeout` bounds how long a query waits for a connection, so an
/// unreachable store surfaces as a [`StoreError`] instead of hanging.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn create_lazy_pool(
    database_url: &secrecy::SecretString,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url.expose_secret())
}

/// Read the store's current time (`SELECT NOW()`).
///
/// # Errors
///
/// Returns `StoreError` if the query fails.
pub async fn current_time(pool: &PgPool) -> Result<DateTime<Utc>, StoreError> {
    let now = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
        .fetch_one(pool)
        .await?;
    Ok(now)
}

/// Run a parameterless query and return every row as a column mapping.
///
/// # Errors
///
/// Returns `StoreError` if the query fails.
pub async fn fetch_rows(pool: &PgPool, sql: &str) -> Result<Vec<Row>, StoreError> {
    let rows = sqlx::query(sql).fetch_all(pool).await?;
    Ok(rows.iter().map(row::row_to_map).collect())
}
