//! Service context - dependency container for services
//!
//! Holds the stores, the notification dispatcher and the optional Redis
//! publisher needed by services.

use std::sync::Arc;

use forum_cache::{Publisher, RedisPool};
use forum_common::{AppConfig, ReactionConfig};
use forum_core::traits::{
    ContentStore, NotificationDispatcher, NotificationRepository, ReportRepository,
};
use forum_core::DomainEvent;
use forum_db::{
    InMemoryContentStore, InMemoryNotificationRepository, InMemoryReportRepository,
    PgContentStore, PgNotificationRepository, PgReportRepository,
};
use tracing::{info, warn};

use super::dispatcher::StoreAndPushDispatcher;
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every store sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Stores
    content_store: Arc<dyn ContentStore>,
    notification_repo: Arc<dyn NotificationRepository>,
    report_repo: Arc<dyn ReportRepository>,

    // Fan-out
    dispatcher: Arc<dyn NotificationDispatcher>,
    publisher: Option<Publisher>,

    reaction_config: ReactionConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        content_store: Arc<dyn ContentStore>,
        notification_repo: Arc<dyn NotificationRepository>,
        report_repo: Arc<dyn ReportRepository>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        publisher: Option<Publisher>,
        reaction_config: ReactionConfig,
    ) -> Self {
        Self {
            content_store,
            notification_repo,
            report_repo,
            dispatcher,
            publisher,
            reaction_config,
        }
    }

    /// Wire PostgreSQL stores and, when configured, the Redis publisher
    pub async fn from_config(config: &AppConfig) -> ServiceResult<Self> {
        let pool = forum_db::create_pool(&config.database)
            .await
            .map_err(|e| ServiceError::internal(format!("database connection failed: {e}")))?;
        forum_db::run_migrations(&pool)
            .await
            .map_err(|e| ServiceError::internal(format!("schema setup failed: {e}")))?;

        let publisher = match &config.redis {
            Some(redis) => {
                let redis_pool = RedisPool::from_config(redis)
                    .map_err(|e| ServiceError::internal(e.to_string()))?;
                if let Err(e) = redis_pool.ping().await {
                    warn!(error = %e, "Redis unreachable, pushes will fail until it recovers");
                }
                Some(Publisher::new(redis_pool))
            }
            None => {
                info!("REDIS_URL not set, notifications will not be pushed");
                None
            }
        };

        ServiceContextBuilder::new()
            .content_store(Arc::new(PgContentStore::new(pool.clone())))
            .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
            .report_repo(Arc::new(PgReportRepository::new(pool)))
            .maybe_publisher(publisher)
            .reaction_config(config.reaction)
            .build()
    }

    // === Stores ===

    /// Get the content store
    pub fn content_store(&self) -> &dyn ContentStore {
        self.content_store.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the report repository
    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    // === Fan-out ===

    /// Get the notification dispatcher
    pub fn dispatcher(&self) -> &dyn NotificationDispatcher {
        self.dispatcher.as_ref()
    }

    /// Get the Redis pub/sub publisher, if configured
    pub fn publisher(&self) -> Option<&Publisher> {
        self.publisher.as_ref()
    }

    /// Publish a domain event, logging instead of failing
    pub async fn publish(&self, event: DomainEvent) {
        let Some(publisher) = &self.publisher else {
            return;
        };
        if let Err(e) = publisher.publish_domain_event(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }
    }

    /// Retry budget for reaction writes
    pub fn reaction_config(&self) -> &ReactionConfig {
        &self.reaction_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("stores", &"...")
            .field("publisher", &self.publisher.is_some())
            .field("reaction_config", &self.reaction_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// The dispatcher defaults to a [`StoreAndPushDispatcher`] over the
/// notification repository and publisher.
#[derive(Default)]
pub struct ServiceContextBuilder {
    content_store: Option<Arc<dyn ContentStore>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    report_repo: Option<Arc<dyn ReportRepository>>,
    dispatcher: Option<Arc<dyn NotificationDispatcher>>,
    publisher: Option<Publisher>,
    reaction_config: ReactionConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-loaded with empty in-memory stores
    pub fn in_memory() -> Self {
        Self::new()
            .content_store(Arc::new(InMemoryContentStore::new()))
            .notification_repo(Arc::new(InMemoryNotificationRepository::new()))
            .report_repo(Arc::new(InMemoryReportRepository::new()))
    }

    pub fn content_store(mut self, store: Arc<dyn ContentStore>) -> Self {
        self.content_store = Some(store);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn dispatcher(mut self, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn publisher(self, publisher: Publisher) -> Self {
        self.maybe_publisher(Some(publisher))
    }

    pub fn maybe_publisher(mut self, publisher: Option<Publisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn reaction_config(mut self, config: ReactionConfig) -> Self {
        self.reaction_config = config;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let content_store = self
            .content_store
            .ok_or_else(|| ServiceError::validation("content_store is required"))?;
        let notification_repo = self
            .notification_repo
            .ok_or_else(|| ServiceError::validation("notification_repo is required"))?;
        let report_repo = self
            .report_repo
            .ok_or_else(|| ServiceError::validation("report_repo is required"))?;

        let dispatcher = match self.dispatcher {
            Some(dispatcher) => dispatcher,
            None => Arc::new(StoreAndPushDispatcher::new(
                Arc::clone(&notification_repo),
                self.publisher.clone(),
            )),
        };

        Ok(ServiceContext::new(
            content_store,
            notification_repo,
            report_repo,
            dispatcher,
            self.publisher,
            self.reaction_config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_stores() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("content_store is required"));
    }

    #[test]
    fn test_in_memory_builder() {
        let ctx = ServiceContextBuilder::in_memory()
            .reaction_config(ReactionConfig {
                max_attempts: 3,
                ..ReactionConfig::default()
            })
            .build()
            .unwrap();
        assert!(ctx.publisher().is_none());
        assert_eq!(ctx.reaction_config().max_attempts, 3);
    }
}
