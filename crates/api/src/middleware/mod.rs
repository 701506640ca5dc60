//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors and transactions)
//! 2. CORS (any origin, or the single configured front-end origin)
//! 3. `TraceLayer` (request span with an empty `request_id` field)
//! 4. Request ID (fills the span field, tags Sentry, echoes the header)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
