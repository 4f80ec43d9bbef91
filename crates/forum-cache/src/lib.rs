//! # forum-cache
//!
//! Redis layer for pushing forum events to live sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Lazily connecting deadpool-redis pool
//! - **Pub/Sub**: Domain events published on per-user and per-content channels
//!
//! ## Example
//!
//! ```ignore
//! use forum_cache::{Publisher, RedisPool};
//!
//! let pool = RedisPool::from_config(&redis_config)?;
//! let publisher = Publisher::new(pool);
//!
//! // Lands on `user:<recipient>`
//! publisher.publish_domain_event(&event).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{PushError, PushResult, RedisPool};

// Re-export pubsub types
pub use pubsub::{
    EventTarget, PubSubChannel, PubSubEvent, Publisher, CONTENT_CHANNEL_PREFIX,
    USER_CHANNEL_PREFIX,
};
