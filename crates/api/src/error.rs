//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. `AppError` renders as a JSON
//! body `{"error": "<message>"}` with the matching status code, so no
//! failure escapes a handler as anything other than a JSON response.
//!
//! # Security
//!
//! Store errors are returned to the caller with the driver's raw message.
//! This mirrors the existing API contract and is a known information leak.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use orderdesk_core::OrderPayloadError;

use crate::db::StoreError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed; the message is the raw store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Place-order body is missing a field or key.
    #[error(transparent)]
    Payload(#[from] OrderPayloadError),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Credentials did not match a user.
    #[error("{0}")]
    Unauthorized(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    /// Status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Payload(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for a request milestone.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_field_renders_400() {
        let (status, body) = render(OrderPayloadError::MissingField("city").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Missing required field: city"}));
    }

    #[tokio::test]
    async fn test_missing_key_renders_400() {
        let (status, body) =
            render(OrderPayloadError::MissingKey("phone".to_string()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"error": "Missing key in request data: phone"})
        );
    }

    #[tokio::test]
    async fn test_unauthorized_renders_401() {
        let (status, body) =
            render(AppError::Unauthorized("Invalid email or password".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"error": "Invalid email or password"}));
    }

    #[tokio::test]
    async fn test_store_error_exposes_raw_message() {
        let err = AppError::from(StoreError::from(sqlx::Error::RowNotFound));
        let expected = sqlx::Error::RowNotFound.to_string();

        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], expected.as_str());
    }
}
