//! Order placement and listing.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use orderdesk_core::{NewOrder, OrderId, Row};

use crate::{
    db::OrderRepository,
    error::{Result, add_breadcrumb},
    services::notify_order_placed,
    state::AppState,
};

/// Response for a successfully placed order.
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub status: &'static str,
    pub order_id: OrderId,
}

/// Place an order.
///
/// Validates the body, inserts the order in its own transaction, then sends
/// the WhatsApp confirmation. The confirmation runs only after the insert has
/// committed and its outcome never changes this response.
///
/// # Errors
///
/// - 400 `Missing required field: X` for the first absent required field
/// - 400 `Missing key in request data: X` if a key is absent while building the order
/// - 400 if the body is not JSON
/// - 500 with the store's message if the insert fails
#[instrument(skip(state, payload))]
pub async fn place(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>)> {
    let Json(payload) = payload?;
    let order = NewOrder::parse(&payload)?;

    tracing::info!(
        city = order.city.as_deref().unwrap_or_default(),
        state = order.state.as_deref().unwrap_or_default(),
        "Received order"
    );

    let order_id = OrderRepository::new(state.pool()).insert(&order).await?;
    let order_ref = order_id.to_string();
    add_breadcrumb("orders", "Order placed", Some(&[("order_id", order_ref.as_str())]));

    notify_order_placed(state.whatsapp(), order.phone.as_deref(), order_id).await;

    tracing::info!(%order_id, "Order placed successfully");

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            status: "success",
            order_id,
        }),
    ))
}

/// Return every order row as a column mapping.
///
/// # Errors
///
/// Returns a store error (500) if the query fails.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Row>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    tracing::debug!(count = orders.len(), "Listed orders");
    Ok(Json(orders))
}
