//! PostgreSQL connection pool management

use std::time::Duration;

use forum_common::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Pool timeouts that are not exposed through environment configuration
#[derive(Debug, Clone, Copy)]
pub struct PoolTimeouts {
    /// Maximum time to wait for a connection
    pub acquire: Duration,
    /// Maximum idle time before a connection is closed
    pub idle: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl Default for PoolTimeouts {
    fn default() -> Self {
        Self {
            acquire: Duration::from_secs(10),
            idle: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    create_pool_with_timeouts(config, PoolTimeouts::default()).await
}

/// Create a new PostgreSQL connection pool with explicit timeouts
pub async fn create_pool_with_timeouts(
    config: &DatabaseConfig,
    timeouts: PoolTimeouts,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(timeouts.acquire)
        .idle_timeout(timeouts.idle)
        .max_lifetime(timeouts.max_lifetime)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "PostgreSQL pool created"
    );
    Ok(pool)
}

/// Apply the bundled schema
///
/// Every statement is idempotent, so this is safe to run on each startup.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(include_str!("../../migrations/0001_init.sql"))
        .execute(pool)
        .await?;
    info!("Database schema applied");
    Ok(())
}
