//! HTTP server initialization and runtime setup.
//!
//! Handles database connection, migrations, and the Axum server lifecycle.

use crate::config::{Config, mask_connection_string};
use crate::infrastructure::persistence::PgLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (retried with backoff)
/// - Schema migrations
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails after all retries
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let link_repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let state = AppState::new(link_repository, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Builds the connection pool, retrying with exponential backoff.
///
/// Makes at most `db_connect_retries` attempts in total.
///
/// # Errors
///
/// Returns the last connection error once attempts are exhausted.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(250)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(config.db_connect_retries.saturating_sub(1));

    let masked = mask_connection_string(&config.database_url);

    Retry::spawn(strategy, || {
        let options = options.clone();
        let masked = masked.as_str();
        async move {
            options
                .connect(&config.database_url)
                .await
                .inspect_err(|e| {
                    tracing::warn!(database = %masked, error = %e, "Database connection attempt failed");
                })
        }
    })
    .await
    .with_context(|| format!("Failed to connect to database at {masked}"))
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
