use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::auth::JwtSessionResolver;
use crate::config::{AppConfig, Environment};
use crate::database::{DatabaseManager, MemoryTenantStore, PgTenantStore, TenantStore};
use crate::state::AppState;

/// Where tenant data is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Seeded in-process data, no database required.
    Memory,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smartstore_api=info,audit=info,tower_http=info"));

    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build state, serve until Ctrl-C/SIGTERM, then release the pool.
pub async fn run(config: AppConfig, backend: StoreBackend) -> anyhow::Result<()> {
    tracing::info!(environment = ?config.environment, ?backend, "starting SmartStore API");

    if config.security.auth_secret.is_empty() {
        if config.environment == Environment::Production {
            anyhow::bail!("AUTH_SECRET must be set in production");
        }
        tracing::warn!("AUTH_SECRET is not set; every session will be rejected");
    }

    let store: Arc<dyn TenantStore> = match backend {
        StoreBackend::Postgres => {
            let pool = DatabaseManager::init(&config.database)
                .await
                .context("failed to initialize database pool")?;
            Arc::new(PgTenantStore::new(pool))
        }
        StoreBackend::Memory => Arc::new(MemoryTenantStore::seeded()),
    };

    let sessions = Arc::new(JwtSessionResolver::from_config(&config));
    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(config, sessions, store);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(addr = %bind_addr, "listening");

    axum::serve(listener, crate::app::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("shutdown signal received");
}
