//! Test helpers for integration tests
//!
//! Provides a forum harness over in-memory or PostgreSQL stores.

use std::sync::Arc;

use anyhow::Result;
use forum_common::{try_init_tracing, AppConfig, Environment, ReactionConfig, TracingConfig};
use forum_core::entities::ReactableContent;
use forum_core::traits::NotificationDispatcher;
use forum_core::{ContentId, UserId};
use forum_service::{
    CommentService, NotificationService, ReactionService, ReportService, ServiceContext,
    ServiceContextBuilder,
};

use crate::fixtures::unique_id;

/// Service context plus shortcuts for seeding and calling services
pub struct TestForum {
    pub ctx: ServiceContext,
}

impl TestForum {
    /// Forum over fresh in-memory stores with a fast retry schedule
    pub fn in_memory() -> Result<Self> {
        Self::in_memory_with(fast_retries(ReactionConfig::default().max_attempts), None)
    }

    /// In-memory forum with a custom retry budget and, optionally, dispatcher
    pub fn in_memory_with(
        reaction: ReactionConfig,
        dispatcher: Option<Arc<dyn NotificationDispatcher>>,
    ) -> Result<Self> {
        init_test_tracing();
        let mut builder = ServiceContextBuilder::in_memory().reaction_config(reaction);
        if let Some(dispatcher) = dispatcher {
            builder = builder.dispatcher(dispatcher);
        }
        Ok(Self {
            ctx: builder.build()?,
        })
    }

    /// Forum over the PostgreSQL database named by `DATABASE_URL`
    pub async fn postgres() -> Result<Self> {
        init_test_tracing();
        let config = test_config()?;
        Ok(Self {
            ctx: ServiceContext::from_config(&config).await?,
        })
    }

    /// Insert a post with a unique id
    pub async fn seed_post(&self, author: &str) -> Result<ContentId> {
        let post = ReactableContent::new_post(
            unique_id("post"),
            UserId::new(author),
            "Low tide at Bordeaux Harbour".to_string(),
        );
        self.ctx.content_store().create(&post).await?;
        Ok(post.id)
    }

    /// Load a content item, failing if it is missing
    pub async fn content(&self, id: &ContentId) -> Result<ReactableContent> {
        self.ctx
            .content_store()
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("content {id} not found"))
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        ReactionService::new(&self.ctx)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.ctx)
    }

    pub fn notifications(&self) -> NotificationService<'_> {
        NotificationService::new(&self.ctx)
    }

    pub fn reports(&self) -> ReportService<'_> {
        ReportService::new(&self.ctx)
    }
}

/// Retry schedule with millisecond backoff so tests stay quick
pub fn fast_retries(max_attempts: u32) -> ReactionConfig {
    ReactionConfig {
        max_attempts,
        base_backoff_ms: 1,
        max_backoff_ms: 4,
    }
}

/// Debug-level logs, shown by `cargo test -- --nocapture`
pub fn init_test_tracing() {
    let _ = try_init_tracing(&TracingConfig::for_environment(Environment::Development));
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if a database is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}
