//! Notification dispatcher that persists, then pushes

use std::sync::Arc;

use async_trait::async_trait;
use forum_cache::Publisher;
use forum_core::entities::{NewNotification, Notification};
use forum_core::events::NotificationCreatedEvent;
use forum_core::traits::{NotificationDispatcher, NotificationRepository, RepoResult};
use forum_core::DomainEvent;
use tracing::{debug, instrument, warn};

/// Stores each notification, then publishes it on the recipient's channel
///
/// The inbox row is the source of truth. A failed push is logged and the
/// notification stays readable through `NotificationService`.
#[derive(Clone)]
pub struct StoreAndPushDispatcher {
    repo: Arc<dyn NotificationRepository>,
    publisher: Option<Publisher>,
}

impl StoreAndPushDispatcher {
    pub fn new(repo: Arc<dyn NotificationRepository>, publisher: Option<Publisher>) -> Self {
        Self { repo, publisher }
    }
}

impl std::fmt::Debug for StoreAndPushDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAndPushDispatcher")
            .field("push", &self.publisher.is_some())
            .finish()
    }
}

#[async_trait]
impl NotificationDispatcher for StoreAndPushDispatcher {
    #[instrument(skip(self, notification), fields(recipient_id = %notification.recipient_id, kind = notification.kind.as_str()))]
    async fn notify(&self, notification: NewNotification) -> RepoResult<()> {
        let notification = Notification::from_new(notification);
        self.repo.create(&notification).await?;
        debug!(notification_id = %notification.id, "Notification stored");

        if let Some(publisher) = &self.publisher {
            let event = DomainEvent::NotificationCreated(NotificationCreatedEvent::new(notification));
            if let Err(e) = publisher.publish_domain_event(&event).await {
                warn!(error = %e, "Failed to push notification");
            }
        }

        Ok(())
    }
}
