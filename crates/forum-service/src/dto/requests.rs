//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use forum_core::entities::{ReportAction, MAX_BODY_LENGTH};
use serde::Deserialize;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Add a comment to a post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"),
        custom(function = "not_blank")
    )]
    pub body: String,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Inbox listing options
#[derive(Debug, Clone, Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,

    /// Clamped to 1..=100
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for ListNotificationsQuery {
    fn default() -> Self {
        Self {
            unread_only: false,
            limit: default_limit(),
        }
    }
}

fn default_limit() -> i64 {
    50
}

// ============================================================================
// Report Requests
// ============================================================================

/// File a report against a post or comment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(
        length(min = 3, max = 500, message = "Reason must be 3-500 characters"),
        custom(function = "not_blank")
    )]
    pub reason: String,
}

/// Moderator decision on a pending report
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolveReportRequest {
    pub action: ReportAction,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}
