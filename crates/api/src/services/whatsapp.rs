//! WhatsApp Cloud API client.
//!
//! Sends a single templated message per call to
//! `{base}/{phone_number_id}/messages`. The configured template is sent as-is;
//! the order ID is recorded in the tracing span but is not part of the
//! message body.

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use orderdesk_core::OrderId;

use crate::config::WhatsAppConfig;

/// Errors that prevent a provider outcome from being observed at all.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// HTTP request failed (connect, TLS, I/O).
    #[error("WhatsApp request failed: {0}")]
    Request(String),

    /// Response could not be read or lacked a message ID.
    #[error("WhatsApp response error: {0}")]
    Response(String),
}

/// Outcome reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum NotificationResult {
    /// Provider accepted the message (HTTP 200).
    #[serde(rename = "success")]
    Sent { message_id: String },

    /// Provider answered with any other status; `response` is its raw body.
    ///
    /// The HTTP status is kept for logging but not serialized; the tag
    /// already occupies `status`.
    #[serde(rename = "error")]
    Rejected {
        #[serde(skip)]
        status: u16,
        response: Value,
    },
}

/// Templated message request body.
#[derive(Debug, Serialize)]
struct TemplateMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    template: Template<'a>,
}

#[derive(Debug, Serialize)]
struct Template<'a> {
    name: &'a str,
    language: Language<'a>,
}

#[derive(Debug, Serialize)]
struct Language<'a> {
    code: &'a str,
}

/// Successful send response; only the message IDs are used.
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    id: String,
}

/// WhatsApp Cloud API client for order notifications.
#[derive(Clone)]
pub struct WhatsAppClient {
    /// HTTP client.
    client: Client,
    /// Bearer token for authentication.
    access_token: SecretString,
    /// Fully-qualified messages endpoint.
    messages_url: String,
    template_name: String,
    template_language: String,
}

impl std::fmt::Debug for WhatsAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClient")
            .field("access_token", &"[REDACTED]")
            .field("messages_url", &self.messages_url)
            .field("template_name", &self.template_name)
            .finish_non_exhaustive()
    }
}

impl WhatsAppClient {
    /// Create a new WhatsApp client.
    ///
    /// Uses the HTTP client's default timeouts; no retry is attempted.
    #[must_use]
    pub fn new(config: &WhatsAppConfig) -> Self {
        Self {
            client: Client::new(),
            access_token: config.access_token.clone(),
            messages_url: config.messages_url(),
            template_name: config.template_name.clone(),
            template_language: config.template_language.clone(),
        }
    }

    /// Get the messages endpoint this client posts to.
    #[must_use]
    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    /// Send the order-confirmation template to `phone_number`.
    ///
    /// HTTP 200 yields [`NotificationResult::Sent`] with the first message ID;
    /// any other status yields [`NotificationResult::Rejected`] carrying the
    /// raw response body (as JSON when it parses, otherwise as a string).
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the request cannot be sent, the body
    /// cannot be read, or a 200 response carries no message ID.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn notify(
        &self,
        phone_number: &str,
        order_id: OrderId,
    ) -> Result<NotificationResult, NotificationError> {
        let message = TemplateMessage {
            messaging_product: "whatsapp",
            to: phone_number,
            kind: "template",
            template: Template {
                name: &self.template_name,
                language: Language {
                    code: &self.template_language,
                },
            },
        };

        let response = self
            .client
            .post(&self.messages_url)
            .bearer_auth(self.access_token.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| NotificationError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotificationError::Response(e.to_string()))?;

        if status != StatusCode::OK {
            let response = serde_json::from_str(&body).unwrap_or_else(|_| Value::String(body));
            return Ok(NotificationResult::Rejected {
                status: status.as_u16(),
                response,
            });
        }

        let parsed: SendMessageResponse =
            serde_json::from_str(&body).map_err(|e| NotificationError::Response(e.to_string()))?;
        let message_id = parsed
            .messages
            .into_iter()
            .next()
            .map(|message| message.id)
            .ok_or_else(|| {
                NotificationError::Response("response contained no message id".to_string())
            })?;

        debug!(message_id = %message_id, "WhatsApp message accepted");

        Ok(NotificationResult::Sent { message_id })
    }
}
