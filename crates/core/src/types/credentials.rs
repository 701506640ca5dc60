//! Login credentials.

use serde_json::Value;

use super::payload::{field_text, has_field};

/// An email/password pair taken from a login request.
///
/// Both fields must be present in the body; a `null` value is kept as
/// `None` and simply never matches a stored user.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Extract credentials from a login body.
    ///
    /// Returns `None` if either `email` or `password` is absent.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        if !has_field(payload, "email") || !has_field(payload, "password") {
            return None;
        }

        Some(Self {
            email: payload.get("email").and_then(field_text),
            password: payload.get("password").and_then(field_text),
        })
    }
}
