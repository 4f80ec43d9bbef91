//! # forum-common
//!
//! Shared utilities including configuration, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, ReactionConfig, RedisConfig,
};
pub use error::{domain_status, AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, LogFormat, TracingConfig, TracingError};
