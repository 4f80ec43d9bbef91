//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use forum_core::entities::{Notification, ReactableContent, ReactionTally, Report};

use super::responses::{CommentResponse, NotificationResponse, ReactionResponse, ReportResponse};

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<&ReactionTally> for ReactionResponse {
    fn from(tally: &ReactionTally) -> Self {
        Self {
            like_count: tally.like_count,
            liked_by: tally.liked_by.clone(),
            dislike_count: tally.dislike_count,
            disliked_by: tally.disliked_by.clone(),
            is_new_like: false,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&ReactableContent> for CommentResponse {
    fn from(content: &ReactableContent) -> Self {
        Self {
            id: content.id.clone(),
            post_id: content.thread_id().clone(),
            author_id: content.author_id.clone(),
            body: content.body.clone(),
            like_count: content.tally.like_count,
            dislike_count: content.tally.dislike_count,
            created_at: content.created_at,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            kind: n.kind,
            message: n.message.clone(),
            link: n.link.clone(),
            read: n.read,
            created_at: n.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self::from(&n)
    }
}

// ============================================================================
// Report Mappers
// ============================================================================

impl From<&Report> for ReportResponse {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            content_id: report.content_id.clone(),
            content_kind: report.content_kind,
            reporter_id: report.reporter_id.clone(),
            reason: report.reason.clone(),
            status: report.status,
            resolved_by: report.resolved_by.clone(),
            resolution_note: report.resolution_note.clone(),
            created_at: report.created_at,
            resolved_at: report.resolved_at,
        }
    }
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self::from(&report)
    }
}
