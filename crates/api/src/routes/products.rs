//! Product catalog listing.

use axum::{Json, extract::State};
use tracing::instrument;

use orderdesk_core::Row;

use crate::{db::ProductRepository, error::Result, state::AppState};

/// Return every product row as a column mapping.
///
/// # Errors
///
/// Returns a store error (500) if the query fails.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Row>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::routes::test_support::{send, unreachable_store_app};

    #[tokio::test]
    async fn test_unreachable_store_is_500_for_get_and_post() {
        for method in [Method::GET, Method::POST] {
            let (status, body) = send(unreachable_store_app(), method, "/products", None).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body["error"].is_string());
        }
    }
}
