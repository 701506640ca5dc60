//! Order Desk API - order-management backend.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` for products, orders and users (via sqlx)
//! - WhatsApp Cloud API for order confirmations
//! - Sentry + tracing for error tracking and logs

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orderdesk_api::{config::ApiConfig, db, state::AppState};

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
enum ServeError {
    #[error("Failed to create database pool: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the Sentry client when `SENTRY_DSN` is set.
///
/// The returned guard flushes pending events on drop, so it lives for the
/// whole of `main`.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;
    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Into::into),
        attach_stacktrace: true,
        ..Default::default()
    };

    let guard = sentry::init((dsn, options));
    tracing::info!("Sentry enabled");
    Some(guard)
}

/// Warnings and errors become Sentry events; info and debug only breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    event_filter_for_level(*metadata.level())
}

fn event_filter_for_level(level: tracing::Level) -> sentry_tracing::EventFilter {
    match level {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Log to stdout and forward to Sentry. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "orderdesk_api=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The Sentry tracing layer needs a live client.
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: ApiConfig) -> Result<(), ServeError> {
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Schema changes go through `od-cli migrate`, never at startup.

    let addr = config.socket_addr();
    let state = AppState::new(config, pool);

    let app = orderdesk_api::app(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    tracing::info!("orderdesk-api listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::event_filter_for_level;
    use super::sentry_tracing::EventFilter;

    #[test]
    fn test_event_filter_levels() {
        assert!(matches!(event_filter_for_level(Level::ERROR), EventFilter::Event));
        assert!(matches!(event_filter_for_level(Level::WARN), EventFilter::Event));
        assert!(matches!(event_filter_for_level(Level::INFO), EventFilter::Breadcrumb));
        assert!(matches!(event_filter_for_level(Level::DEBUG), EventFilter::Breadcrumb));
        assert!(matches!(event_filter_for_level(Level::TRACE), EventFilter::Ignore));
    }
}
