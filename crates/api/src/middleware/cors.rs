//! CORS policy.

use axum::http::{HeaderValue, request::Parts};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the CORS layer.
///
/// With no configured origin every origin is allowed. Otherwise only a
/// request whose `Origin` equals `origin` gets an allow header back; any
/// other origin gets none. Methods and request headers are not restricted.
#[must_use]
pub fn cors_layer(origin: Option<&HeaderValue>) -> CorsLayer {
    let allow_origin = origin.cloned().map_or_else(AllowOrigin::any, |allowed| {
        AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| *origin == allowed)
    });

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
