//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::WhatsAppClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything inside is
/// immutable after construction; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    whatsapp: WhatsAppClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let whatsapp = WhatsAppClient::new(&config.whatsapp);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                whatsapp,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the WhatsApp notification client.
    #[must_use]
    pub fn whatsapp(&self) -> &WhatsAppClient {
        &self.inner.whatsapp
    }
}
