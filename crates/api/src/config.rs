//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDERDESK_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `WHATSAPP_ACCESS_TOKEN` - Bearer token for the WhatsApp Cloud API
//! - `WHATSAPP_PHONE_NUMBER_ID` - Sender phone-number ID
//!
//! ## Optional
//! - `ORDERDESK_HOST` - Bind address (default: 0.0.0.0)
//! - `ORDERDESK_PORT` - Listen port (default: 5000)
//! - `FRONTEND_ORIGIN_PROD` - Single allowed CORS origin (default: any origin)
//! - `WHATSAPP_API_BASE_URL` - Graph API base (default: <https://graph.facebook.com/v18.0>)
//! - `WHATSAPP_TEMPLATE_NAME` - Message template (default: `hello_world`)
//! - `WHATSAPP_TEMPLATE_LANGUAGE` - Template language code (default: `en_US`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "5000";
const DEFAULT_WHATSAPP_API_BASE_URL: &str = "https://graph.facebook.com/v18.0";
const DEFAULT_TEMPLATE_NAME: &str = "hello_world";
const DEFAULT_TEMPLATE_LANGUAGE: &str = "en_US";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Service configuration.
///
/// Loaded once at startup and handed to [`crate::state::AppState`]; nothing
/// reads the environment after that.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// The only origin allowed by CORS, or `None` to allow any origin
    pub frontend_origin: Option<HeaderValue>,
    /// WhatsApp Cloud API configuration
    pub whatsapp: WhatsAppConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// WhatsApp Cloud API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct WhatsAppConfig {
    /// Bearer token for the Graph API
    pub access_token: SecretString,
    /// Sender phone-number ID (path segment of the messages endpoint)
    pub phone_number_id: String,
    /// Graph API base URL, including the version segment
    pub api_base_url: Url,
    /// Name of the approved message template
    pub template_name: String,
    /// Template language code
    pub template_language: String,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field("access_token", &"[REDACTED]")
            .field("phone_number_id", &self.phone_number_id)
            .field("api_base_url", &self.api_base_url.as_str())
            .field("template_name", &self.template_name)
            .field("template_language", &self.template_language)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(lookup);

        let database_url = vars
            .optional("ORDERDESK_DATABASE_URL")
            .or_else(|| vars.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("ORDERDESK_DATABASE_URL".to_string()))?;
        let host = vars.parsed::<IpAddr>("ORDERDESK_HOST", DEFAULT_HOST)?;
        let port = vars.parsed::<u16>("ORDERDESK_PORT", DEFAULT_PORT)?;
        let frontend_origin = vars
            .optional("FRONTEND_ORIGIN_PROD")
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|e| {
                    ConfigError::InvalidEnvVar("FRONTEND_ORIGIN_PROD".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            database_url,
            host,
            port,
            frontend_origin,
            whatsapp: WhatsAppConfig::load(&vars)?,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl WhatsAppConfig {
    /// Load only the WhatsApp settings (used by the CLI).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(&Vars(|key: &str| std::env::var(key).ok()))
    }

    fn load<F: Fn(&str) -> Option<String>>(vars: &Vars<F>) -> Result<Self, ConfigError> {
        Ok(Self {
            access_token: SecretString::from(vars.required("WHATSAPP_ACCESS_TOKEN")?),
            phone_number_id: vars.required("WHATSAPP_PHONE_NUMBER_ID")?,
            api_base_url: vars.parsed::<Url>(
                "WHATSAPP_API_BASE_URL",
                DEFAULT_WHATSAPP_API_BASE_URL,
            )?,
            template_name: vars.or_default("WHATSAPP_TEMPLATE_NAME", DEFAULT_TEMPLATE_NAME),
            template_language: vars
                .or_default("WHATSAPP_TEMPLATE_LANGUAGE", DEFAULT_TEMPLATE_LANGUAGE),
        })
    }

    /// The messages endpoint for the configured sender.
    #[must_use]
    pub fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.api_base_url.as_str().trim_end_matches('/'),
            self.phone_number_id
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// A source of environment-style variables.
struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable (or its default) into `T`.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}
