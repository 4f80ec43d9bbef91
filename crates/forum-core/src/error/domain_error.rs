//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::entities::TallyViolation;
use crate::value_objects::ContentId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Content not found: {0}")]
    ContentNotFound(ContentId),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Uuid),

    #[error("Report not found: {0}")]
    ReportNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Comments can only be attached to posts: {0}")]
    InvalidParent(ContentId),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Not content author")]
    NotContentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// A concurrent writer changed the document between read and write
    #[error("Write conflict on content {0}")]
    WriteConflict(ContentId),

    /// The reaction could not be committed within the retry budget
    #[error("Reaction on {content_id} not committed after {attempts} attempts")]
    ReactionConflict { content_id: ContentId, attempts: u32 },

    #[error("Content already reported by this user")]
    DuplicateReport,

    #[error("Report already resolved: {0}")]
    ReportAlreadyResolved(Uuid),

    // =========================================================================
    // Integrity Errors
    // =========================================================================
    #[error("Corrupt reaction state on content {content_id}: {violation}")]
    DataIntegrity {
        content_id: ContentId,
        violation: TallyViolation,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Notification dispatch failed: {0}")]
    NotificationDispatch(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ContentNotFound(_) => "UNKNOWN_CONTENT",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::ReportNotFound(_) => "UNKNOWN_REPORT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidParent(_) => "INVALID_PARENT",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::NotContentAuthor => "NOT_CONTENT_AUTHOR",

            // Conflict
            Self::WriteConflict(_) => "WRITE_CONFLICT",
            Self::ReactionConflict { .. } => "REACTION_CONFLICT",
            Self::DuplicateReport => "DUPLICATE_REPORT",
            Self::ReportAlreadyResolved(_) => "REPORT_ALREADY_RESOLVED",

            // Integrity
            Self::DataIntegrity { .. } => "DATA_INTEGRITY",

            // Infrastructure
            Self::NotificationDispatch(_) => "NOTIFICATION_DISPATCH_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContentNotFound(_) | Self::NotificationNotFound(_) | Self::ReportNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::ContentTooLong { .. } | Self::InvalidParent(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPermission(_) | Self::NotContentAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::WriteConflict(_)
                | Self::ReactionConflict { .. }
                | Self::DuplicateReport
                | Self::ReportAlreadyResolved(_)
        )
    }

    /// Check if the caller may retry the whole operation and expect a different outcome
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::WriteConflict(_) | Self::ReactionConflict { .. })
    }
}
