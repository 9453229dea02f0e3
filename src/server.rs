//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database connections, migrations and the Axum
//! server lifecycle.

use crate::application::services::AuthService;
use crate::config::{Config, SeedUser, StorageBackend};
use crate::domain::entities::User;
use crate::infrastructure::memory::InMemoryUserRepository;
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

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres storage backend")?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// In-memory user store holding the configured seed users.
fn seeded_user_repository(seed_users: &[SeedUser]) -> InMemoryUserRepository {
    let now = chrono::Utc::now();

    InMemoryUserRepository::with_users(
        seed_users
            .iter()
            .map(|u| User::new(u.id.clone(), u.name.clone(), now)),
    )
}

/// Builds the application state for the configured storage backend.
///
/// For PostgreSQL this connects and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migrations fail.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let auth_service = AuthService::new(config.auth_signing_secret.clone());

    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to apply migrations")?;
            tracing::info!("Migrations applied");

            Ok(AppState::postgres(
                Arc::new(pool),
                auth_service,
                config.app_base_url.clone(),
                config.short_code_length,
            ))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");

            Ok(AppState::in_memory(
                Arc::new(seeded_user_repository(&config.seed_users)),
                auth_service,
                config.app_base_url.clone(),
                config.short_code_length,
            ))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or in-memory)
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
