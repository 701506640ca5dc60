//! Order placement payload.
//!
//! Orders arrive as a loosely-typed JSON object. Validation happens in two
//! stages: [`NewOrder::missing_field`] reports the first absent top-level
//! field, then [`NewOrder::from_payload`] builds the typed order and reports
//! any key it cannot find as [`OrderPayloadError::MissingKey`].

use serde_json::Value;
use thiserror::Error;

use super::payload::{field_text, has_field};

/// Errors raised while turning a request body into a [`NewOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderPayloadError {
    /// A required top-level field is absent from the body.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A key needed to build the order was absent during processing.
    #[error("Missing key in request data: {0}")]
    MissingKey(String),
}

/// A validated order, ready to be inserted.
///
/// The identifier and order date are never part of this type: both are
/// assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Arbitrary line-item payload, stored as serialized JSON text.
    pub orderdetails: Value,
}

impl NewOrder {
    /// Fields that must be present in a place-order body, in check order.
    pub const REQUIRED_FIELDS: [&'static str; 8] = [
        "name",
        "address",
        "city",
        "zip",
        "state",
        "phone",
        "email",
        "orderdetails",
    ];

    /// Return the first required field missing from `payload`, if any.
    ///
    /// A body that is not a JSON object has no fields, so `name` is reported.
    #[must_use]
    pub fn missing_field(payload: &Value) -> Option<&'static str> {
        Self::REQUIRED_FIELDS
            .into_iter()
            .find(|field| !has_field(payload, field))
    }

    /// Validate a request body and build the order.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` for the first absent required field, or
    /// `MissingKey` if building the order hits an absent key.
    pub fn parse(payload: &Value) -> Result<Self, OrderPayloadError> {
        if let Some(field) = Self::missing_field(payload) {
            return Err(OrderPayloadError::MissingField(field));
        }
        Self::from_payload(payload)
    }

    /// Build the order from a body without the up-front field check.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` naming the first key that cannot be found.
    pub fn from_payload(payload: &Value) -> Result<Self, OrderPayloadError> {
        let text = |key: &str| require(payload, key).map(field_text);

        Ok(Self {
            name: text("name")?,
            address: text("address")?,
            city: text("city")?,
            zip: text("zip")?,
            state: text("state")?,
            phone: text("phone")?,
            email: text("email")?,
            orderdetails: require(payload, "orderdetails")?.clone(),
        })
    }

    /// The order details serialized to the text stored in the `orderdetails` column.
    #[must_use]
    pub fn orderdetails_json(&self) -> String {
        self.orderdetails.to_string()
    }
}

fn require<'a>(payload: &'a Value, key: &str) -> Result<&'a Value, OrderPayloadError> {
    payload
        .get(key)
        .ok_or_else(|| OrderPayloadError::MissingKey(key.to_owned()))
}
