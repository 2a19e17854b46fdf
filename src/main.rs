//! bloglist - Blog Listing Backend API
//!
//! Serves blog CRUD, user registration, token login and like statistics
//! over JSON.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use bloglist::api::{self, AppState};
use bloglist::config::{Config, LogFormat, StorageBackend};
use bloglist::db;
use bloglist::repository::{InMemoryStore, PgStore};
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bloglist=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Connect, migrate and verify the Postgres backend
async fn open_postgres(config: &Config) -> anyhow::Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = db::connect(config).await.context("database connection failed")?;

    if config.run_migrations {
        db::run_migrations(&pool).await.context("migrations failed")?;
        tracing::info!("Migrations applied");
    }

    db::verify_connection(&pool).await?;
    if !db::check_schema(&pool).await? {
        tracing::error!("Database schema is not complete. Please run migrations.");
        return Err(anyhow::anyhow!("Database schema incomplete"));
    }

    tracing::info!("Database connected successfully");
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(
        storage = ?config.storage,
        environment = %config.environment,
        require_auth_for_writes = config.require_auth_for_writes,
        "Starting bloglist server"
    );

    let (state, pool) = match config.storage {
        StorageBackend::Postgres => {
            let pool = open_postgres(&config).await?;
            let store = Arc::new(PgStore::new(pool.clone()));
            (AppState::new(store.clone(), store, &config), Some(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            (AppState::in_memory(InMemoryStore::new(), &config), None)
        }
    };

    let app = api::build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Cleanup
    tracing::info!("Server shutting down...");
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connections closed");
    }
    tracing::info!("Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
