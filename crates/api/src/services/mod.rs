//! Outbound integrations.
//!
//! # Services
//!
//! - `whatsapp` - WhatsApp Cloud API client for templated messages
//! - `order_confirmation` - Best-effort confirmation sent after an order is placed

pub mod order_confirmation;
pub mod whatsapp;

pub use order_confirmation::notify_order_placed;
pub use whatsapp::{NotificationError, NotificationResult, WhatsAppClient};
