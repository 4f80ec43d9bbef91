//! # forum-db
//!
//! Storage layer implementing the forum-core ports with PostgreSQL via SQLx,
//! plus in-process implementations of the same ports.
//!
//! ## Overview
//!
//! - Connection pool management and schema setup
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the version-checked reaction write
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_common::AppConfig;
//! use forum_db::{create_pool, run_migrations, PgContentStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!     let content = PgContentStore::new(pool);
//!
//!     // Hand the store to forum-service...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{InMemoryContentStore, InMemoryNotificationRepository, InMemoryReportRepository};
pub use pool::{create_pool, create_pool_with_timeouts, run_migrations, PgPool, PoolTimeouts};
pub use repositories::{PgContentStore, PgNotificationRepository, PgReportRepository};
