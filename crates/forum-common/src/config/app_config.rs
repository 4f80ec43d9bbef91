//! Application configuration structs
//!
//! Loads configuration from environment variables and config files.

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    /// Notifications are only persisted, never pushed, when Redis is absent
    pub redis: Option<RedisConfig>,
    pub reaction: ReactionConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Retry budget for reaction writes that lose an optimistic-concurrency race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReactionConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl ReactionConfig {
    /// Backoff before retry number `attempt` (1-based), without jitter
    ///
    /// Doubles from the base and saturates at the cap.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        let ms = self.base_backoff_ms.saturating_mul(factor).min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }
}

// Default value functions
fn default_app_name() -> String {
    "guernsey-speaks".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_backoff_ms() -> u64 {
    10
}

fn default_max_backoff_ms() -> u64 {
    200
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or a
    /// numeric variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let reaction = ReactionConfig {
            max_attempts: parse_var("REACTION_MAX_ATTEMPTS")?.unwrap_or_else(default_max_attempts),
            base_backoff_ms: parse_var("REACTION_BASE_BACKOFF_MS")?
                .unwrap_or_else(default_base_backoff_ms),
            max_backoff_ms: parse_var("REACTION_MAX_BACKOFF_MS")?
                .unwrap_or_else(default_max_backoff_ms),
        };
        if reaction.max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "REACTION_MAX_ATTEMPTS",
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            redis: match env::var("REDIS_URL") {
                Ok(url) if !url.trim().is_empty() => Some(RedisConfig {
                    url,
                    max_connections: parse_var("REDIS_MAX_CONNECTIONS")?
                        .unwrap_or_else(default_redis_max_connections),
                }),
                _ => None,
            },
            reaction,
        })
    }
}

/// Read an optional variable, failing if it is set but unparsable
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
