//! Order repository for database operations.
//!
//! Orders are inserted once and never updated or deleted. The store assigns
//! both `id` and `orderdate`.

use sqlx::PgPool;

use orderdesk_core::{NewOrder, OrderId, Row};

use super::{StoreError, fetch_rows};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Return every order row with all of its columns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Row>, StoreError> {
        fetch_rows(self.pool, "SELECT * FROM orders").await
    }

    /// Insert an order and return its store-generated ID.
    ///
    /// The order details are stored as serialized JSON text. The insert runs
    /// in its own transaction and is committed before this returns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the transaction or insert fails; nothing is
    /// committed in that case.
    pub async fn insert(&self, order: &NewOrder) -> Result<OrderId, StoreError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO orders (name, address, city, zip, state, orderdate, phone, email, orderdetails)
            VALUES ($1, $2, $3, $4, $5, NOW(), $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(order.name.as_deref())
        .bind(order.address.as_deref())
        .bind(order.city.as_deref())
        .bind(order.zip.as_deref())
        .bind(order.state.as_deref())
        .bind(order.phone.as_deref())
        .bind(order.email.as_deref())
        .bind(order.orderdetails_json())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }
}
