//! Response DTOs for service operations
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use forum_core::entities::{
    ContentKind, NotificationKind, ReactionState, ReportStatus,
};
use forum_core::value_objects::{ContentId, UserId};
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Reaction Responses
// ============================================================================

/// Reaction tally after a toggle
///
/// Serializes as `{"likeCount", "likedBy", "dislikeCount", "dislikedBy"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub like_count: i64,
    pub liked_by: Vec<UserId>,
    pub dislike_count: i64,
    pub disliked_by: Vec<UserId>,
    /// The toggle moved the caller into LIKED from NONE or DISLIKED
    #[serde(skip)]
    pub is_new_like: bool,
}

/// Counts plus the caller's own state, for rendering reaction buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummaryResponse {
    pub content_id: ContentId,
    pub like_count: i64,
    pub dislike_count: i64,
    pub state: ReactionState,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: ContentId,
    pub post_id: ContentId,
    pub author_id: UserId,
    pub body: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub link: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread: i64,
}

// ============================================================================
// Report Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: Uuid,
    pub content_id: ContentId,
    pub content_kind: ContentKind,
    pub reporter_id: UserId,
    pub reason: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_note: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}
