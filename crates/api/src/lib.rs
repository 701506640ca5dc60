//! Order Desk API library.
//!
//! The service is built as a library so the router can be exercised by
//! unit and integration tests without starting the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, extract::Request};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full router: routes, request IDs, request tracing and CORS.
///
/// Sentry layers are added by the binary, outside of this.
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(state.config().frontend_origin.as_ref());

    Router::new()
        .merge(routes::routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(cors)
}
