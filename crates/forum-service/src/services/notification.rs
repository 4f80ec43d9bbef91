//! Notification service
//!
//! Read side of a user's inbox.

use forum_core::{DomainError, UserId};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{ListNotificationsQuery, NotificationResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List a user's notifications, newest first
    #[instrument(skip(self))]
    pub async fn list_notifications(
        &self,
        user_id: &UserId,
        query: ListNotificationsQuery,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self
            .ctx
            .notification_repo()
            .find_by_recipient(user_id, query.unread_only, query.limit)
            .await?;

        Ok(notifications.into_iter().map(NotificationResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: &UserId) -> ServiceResult<UnreadCountResponse> {
        let unread = self.ctx.notification_repo().count_unread(user_id).await?;
        Ok(UnreadCountResponse { unread })
    }

    /// Mark one notification read
    ///
    /// Someone else's notification is reported as not found.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, user_id: &UserId, notification_id: Uuid) -> ServiceResult<()> {
        if !self
            .ctx
            .notification_repo()
            .mark_read(notification_id, user_id)
            .await?
        {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }
        Ok(())
    }

    /// Mark every unread notification read, returning how many changed
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: &UserId) -> ServiceResult<u64> {
        let updated = self.ctx.notification_repo().mark_all_read(user_id).await?;
        info!(updated, "Notifications marked read");
        Ok(updated)
    }
}
