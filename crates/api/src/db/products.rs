//! Product catalog repository.

use sqlx::PgPool;

use orderdesk_core::Row;

use super::{StoreError, fetch_rows};

/// Read-only access to `product_catalog`.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Return every product row with all of its columns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Row>, StoreError> {
        fetch_rows(self.pool, "SELECT * FROM product_catalog").await
    }
}
