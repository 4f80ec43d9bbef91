//! Redis connection pool for pushing forum events

use deadpool_redis::{Config, Connection, Pool, Runtime};
use forum_common::RedisConfig;
use forum_core::DomainError;
use tracing::info;

/// Errors from the Redis push path
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("Invalid Redis configuration: {0}")]
    Config(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Event payload not serializable: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<PushError> for DomainError {
    fn from(err: PushError) -> Self {
        DomainError::CacheError(err.to_string())
    }
}

pub type PushResult<T> = Result<T, PushError>;

/// Lazily connecting pool of Redis connections
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

impl RedisPool {
    /// Build the pool; no connection is opened until the first command
    pub fn from_config(config: &RedisConfig) -> PushResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| PushError::Config(e.to_string()))?
            .max_size(config.max_connections as usize)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| PushError::Config(e.to_string()))?;

        info!(
            url = %redact(&config.url),
            max_connections = config.max_connections,
            "Redis pool ready"
        );

        Ok(Self { pool })
    }

    pub async fn get(&self) -> PushResult<Connection> {
        Ok(self.pool.get().await?)
    }

    /// Round-trip a PING to check the server is reachable
    pub async fn ping(&self) -> PushResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Connections currently open
    pub fn open_connections(&self) -> usize {
        self.pool.status().size
    }
}

/// Strip credentials from a Redis URL for logging
fn redact(url: &str) -> &str {
    match url.rsplit_once('@') {
        Some((_, host)) => host,
        None => url,
    }
}
