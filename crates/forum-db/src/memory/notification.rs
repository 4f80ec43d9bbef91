//! In-memory NotificationRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use forum_core::entities::Notification;
use forum_core::traits::{NotificationRepository, RepoResult};
use forum_core::value_objects::UserId;

use crate::repositories::clamp_limit;

#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored notification, in insertion order
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        self.notifications.write().push(notification.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Notification>> {
        Ok(self
            .notifications
            .read()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let limit = usize::try_from(clamp_limit(limit)).unwrap_or(usize::MAX);
        let mut found: Vec<Notification> = self
            .notifications
            .read()
            .iter()
            .filter(|n| &n.recipient_id == recipient_id && !(unread_only && n.read))
            .cloned()
            .collect();
        // Newest first; ties keep the later insert ahead
        found.reverse();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit);
        Ok(found)
    }

    async fn count_unread(&self, recipient_id: &UserId) -> RepoResult<i64> {
        let count = self
            .notifications
            .read()
            .iter()
            .filter(|n| &n.recipient_id == recipient_id && !n.read)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn mark_read(&self, id: Uuid, recipient_id: &UserId) -> RepoResult<bool> {
        let mut notifications = self.notifications.write();
        match notifications
            .iter_mut()
            .find(|n| n.id == id && &n.recipient_id == recipient_id)
        {
            Some(notification) => {
                notification.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient_id: &UserId) -> RepoResult<u64> {
        let mut changed = 0;
        for notification in self
            .notifications
            .write()
            .iter_mut()
            .filter(|n| &n.recipient_id == recipient_id && !n.read)
        {
            notification.read = true;
            changed += 1;
        }
        Ok(changed)
    }
}
