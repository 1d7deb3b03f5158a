use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Database pool already initialized")]
    AlreadyInitialized,

    #[error("Database pool not initialized")]
    NotInitialized,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static POOL: OnceLock<PgPool> = OnceLock::new();

/// Owner of the process-wide Postgres pool.
///
/// Initialized once at startup, handed out by [`DatabaseManager::pool`], and
/// closed by [`DatabaseManager::close`] during graceful shutdown.
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn init(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config.url.as_deref().ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let display_url = Self::redacted_url(url)?;

        if POOL.get().is_some() {
            return Err(DatabaseError::AlreadyInitialized);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        POOL.set(pool.clone()).map_err(|_| DatabaseError::AlreadyInitialized)?;

        info!(url = %display_url, max_connections = config.max_connections, "database pool initialized");
        Ok(pool)
    }

    pub fn pool() -> Result<PgPool, DatabaseError> {
        POOL.get().cloned().ok_or(DatabaseError::NotInitialized)
    }

    /// Close the pool (e.g., on shutdown). No-op when never initialized.
    pub async fn close() {
        if let Some(pool) = POOL.get() {
            pool.close().await;
            info!("database pool closed");
        }
    }

    /// Connection string with the password masked, for logs.
    fn redacted_url(database_url: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(database_url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***")).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
