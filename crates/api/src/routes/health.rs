//! Store connectivity check.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::{db, error::Result, state::AppState};

/// Response for `GET /test-db`.
#[derive(Debug, Serialize)]
pub struct TimestampResponse {
    pub timestamp: DateTime<Utc>,
}

/// Return the store's current time.
///
/// # Errors
///
/// Returns a store error (500) if the database cannot be reached.
#[instrument(skip(state))]
pub async fn test_db(State(state): State<AppState>) -> Result<Json<TimestampResponse>> {
    let timestamp = db::current_time(state.pool()).await?;
    Ok(Json(TimestampResponse { timestamp }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::routes::test_support::{send, unreachable_store_app};

    #[tokio::test]
    async fn test_unreachable_store_is_500() {
        let (status, body) = send(unreachable_store_app(), Method::GET, "/test-db", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }
}
