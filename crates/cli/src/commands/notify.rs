//! Notification check command.
//!
//! # Usage
//!
//! ```bash
//! od-cli notify test -t +15550100
//! ```
//!
//! # Environment Variables
//!
//! - `WHATSAPP_ACCESS_TOKEN`, `WHATSAPP_PHONE_NUMBER_ID` (required)
//! - `WHATSAPP_API_BASE_URL`, `WHATSAPP_TEMPLATE_NAME`, `WHATSAPP_TEMPLATE_LANGUAGE` (optional)

use orderdesk_api::config::{ConfigError, WhatsAppConfig};
use orderdesk_api::services::{NotificationError, NotificationResult, WhatsAppClient};
use orderdesk_core::OrderId;

/// Errors that can occur while sending a test notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Notification(#[from] NotificationError),

    #[error("Provider rejected the message with status {0}")]
    Rejected(u16),
}

/// Send the configured template to `to` once and log the provider's answer.
///
/// # Errors
///
/// Returns `NotifyError` if configuration is missing, the request fails, or
/// the provider does not accept the message.
pub async fn test(to: &str, order_id: i64) -> Result<(), NotifyError> {
    let config = WhatsAppConfig::from_env()?;
    let client = WhatsAppClient::new(&config);

    tracing::info!(url = client.messages_url(), to, "Sending test notification");
    let result = client.notify(to, OrderId::new(order_id)).await?;

    let rendered = serde_json::to_string_pretty(&result).unwrap_or_default();
    match result {
        NotificationResult::Sent { .. } => {
            tracing::info!("Provider accepted the message:\n{rendered}");
            Ok(())
        }
        NotificationResult::Rejected { status, .. } => {
            tracing::error!("Provider rejected the message:\n{rendered}");
            Err(NotifyError::Rejected(status))
        }
    }
}
