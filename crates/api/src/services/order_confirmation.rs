//! Order confirmation, sent after an order has been committed.
//!
//! This is a best-effort step: the outcome is logged and then dropped. It
//! returns `()` so a caller cannot let a provider failure change the
//! response to an order that has already been stored.

use tracing::{error, info, warn};

use orderdesk_core::OrderId;

use super::whatsapp::{NotificationResult, WhatsAppClient};

/// Send the confirmation for `order_id` to `phone`, logging the outcome.
///
/// An order stored without a phone number (`null` in the request) is skipped.
pub async fn notify_order_placed(client: &WhatsAppClient, phone: Option<&str>, order_id: OrderId) {
    let Some(phone) = phone else {
        warn!(%order_id, "Order has no phone number, skipping confirmation");
        return;
    };

    match client.notify(phone, order_id).await {
        Ok(NotificationResult::Sent { message_id }) => {
            info!(%order_id, %message_id, "Order confirmation sent");
        }
        Ok(NotificationResult::Rejected { status, response }) => {
            warn!(%order_id, status, %response, "Order confirmation rejected by provider");
        }
        Err(e) => {
            error!(%order_id, error = %e, "Order confirmation failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::services::whatsapp::tests::{fake_provider, test_config};

    #[tokio::test]
    async fn test_sends_to_order_phone() {
        let (config, captured) =
            fake_provider(StatusCode::OK, r#"{"messages":[{"id":"wamid.1"}]}"#).await;
        let client = WhatsAppClient::new(&config);

        notify_order_placed(&client, Some("+15550100"), OrderId::new(3)).await;

        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1["to"], "+15550100");
    }

    #[tokio::test]
    async fn test_provider_rejection_is_swallowed() {
        let (config, captured) =
            fake_provider(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#).await;
        let client = WhatsAppClient::new(&config);

        notify_order_placed(&client, Some("+100"), OrderId::new(3)).await;

        assert_eq!(captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_swallowed() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = WhatsAppClient::new(&test_config(&format!("http://{addr}/v18.0")));

        notify_order_placed(&client, Some("+100"), OrderId::new(3)).await;
    }

    #[tokio::test]
    async fn test_missing_phone_skips_request() {
        let (config, captured) =
            fake_provider(StatusCode::OK, r#"{"messages":[{"id":"wamid.1"}]}"#).await;
        let client = WhatsAppClient::new(&config);

        notify_order_placed(&client, None, OrderId::new(3)).await;

        assert!(captured.lock().unwrap().is_empty());
    }
}
