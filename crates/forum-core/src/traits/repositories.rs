//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Notification, ReactableContent, ReactionTally, Report};
use crate::error::DomainError;
use crate::value_objects::{ContentId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Content Store
// ============================================================================

/// Computes the next reaction tally from the current document
///
/// Returning an error aborts the transaction without writing.
pub type TallyUpdate<'a> =
    &'a (dyn Fn(&ReactableContent) -> Result<ReactionTally, DomainError> + Send + Sync);

/// Document state on both sides of a committed reaction write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionWrite {
    pub before: ReactableContent,
    pub after: ReactableContent,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Find content by ID
    async fn get(&self, id: &ContentId) -> RepoResult<Option<ReactableContent>>;

    /// Store a new content item
    async fn create(&self, content: &ReactableContent) -> RepoResult<()>;

    /// Delete a content item, returning whether it existed
    async fn delete(&self, id: &ContentId) -> RepoResult<bool>;

    /// Read-modify-write the reaction fields of one document
    ///
    /// Reads the document, rejects it with `DataIntegrity` if its tally is
    /// corrupt, applies `update`, and writes the four reaction fields in a
    /// single statement conditioned on the version that was read. Fails with
    /// `ContentNotFound` if the document is gone and `WriteConflict` if
    /// another writer got there first. Makes exactly one attempt.
    async fn run_transaction(
        &self,
        id: &ContentId,
        update: TallyUpdate<'_>,
    ) -> RepoResult<ReactionWrite>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a new notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Find notification by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Notification>>;

    /// List a user's notifications, newest first
    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>>;

    /// Count unread notifications
    async fn count_unread(&self, recipient_id: &UserId) -> RepoResult<i64>;

    /// Mark one notification read, returning whether it belonged to the recipient
    async fn mark_read(&self, id: Uuid, recipient_id: &UserId) -> RepoResult<bool>;

    /// Mark every unread notification read, returning how many changed
    async fn mark_all_read(&self, recipient_id: &UserId) -> RepoResult<u64>;
}

// ============================================================================
// Report Repository
// ============================================================================

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Store a new report
    async fn create(&self, report: &Report) -> RepoResult<()>;

    /// Find report by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Report>>;

    /// List pending reports, oldest first
    async fn find_pending(&self, limit: i64) -> RepoResult<Vec<Report>>;

    /// List pending reports against one content item
    async fn find_pending_by_content(&self, content_id: &ContentId) -> RepoResult<Vec<Report>>;

    /// Find the reporter's pending report on a content item
    async fn find_pending_by_reporter(
        &self,
        content_id: &ContentId,
        reporter_id: &UserId,
    ) -> RepoResult<Option<Report>>;

    /// Persist status and resolution fields of a still-pending report
    ///
    /// The write only lands while the stored report is pending. Fails with
    /// `ReportAlreadyResolved` if another moderator closed it first and
    /// `ReportNotFound` if it does not exist.
    async fn update(&self, report: &Report) -> RepoResult<()>;
}
