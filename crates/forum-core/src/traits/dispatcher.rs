//! Notification dispatch port

use async_trait::async_trait;

use crate::entities::NewNotification;
use crate::traits::RepoResult;

/// Delivers a notification to its recipient
///
/// Callers treat dispatch as fire-and-forget: an error is logged by the
/// caller and never undoes the write that triggered it.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn notify(&self, notification: NewNotification) -> RepoResult<()>;
}
