//! Email/password login.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use orderdesk_core::{Credentials, UserSummary};

use crate::{
    db::UserRepository,
    error::{AppError, Result},
    state::AppState,
};

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub user: UserSummary,
}

/// Log in with email and password.
///
/// Unknown email and wrong password both yield the same 401.
///
/// # Errors
///
/// - 400 `Email and password are required` (checked before any store access)
/// - 401 `Invalid email or password`
/// - 500 with the store's message if the lookup fails
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let credentials = Credentials::from_payload(&payload)
        .ok_or_else(|| AppError::BadRequest("Email and password are required".to_string()))?;

    tracing::info!(email = ?credentials.email, "Login attempt");

    let user = UserRepository::new(state.pool())
        .find_by_credentials(
            credentials.email.as_deref(),
            credentials.password.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    tracing::info!(user_id = %user.id, "User authenticated");

    Ok(Json(LoginResponse {
        status: "success",
        user,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::test_support::{send, unreachable_store_app};

    #[tokio::test]
    async fn test_missing_fields_is_400_before_store_access() {
        for body in [
            r#"{"email":"a@b.com"}"#,
            r#"{"password":"pw"}"#,
            "{}",
            "[]",
        ] {
            let (status, response) =
                send(unreachable_store_app(), Method::POST, "/login", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response, json!({"error": "Email and password are required"}));
        }
    }

    #[tokio::test]
    async fn test_lookup_with_unreachable_store_is_500() {
        let (status, body) = send(
            unreachable_store_app(),
            Method::POST,
            "/login",
            Some(r#"{"email":"a@b.com","password":"pw"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[test]
    fn test_response_shape() {
        let response = super::LoginResponse {
            status: "success",
            user: orderdesk_core::UserSummary {
                id: orderdesk_core::UserId::new(5),
                name: Some("Ada".to_string()),
            },
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": "success", "user": {"id": 5, "name": "Ada"}})
        );
    }
}
