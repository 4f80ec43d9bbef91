//! Domain events - events emitted when domain state changes
//!
//! These events are pushed to connected clients through the pub/sub layer so
//! open pages can refresh counters and inbox badges without polling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{ContentKind, Notification, ReactableContent, ReactionState};
use crate::value_objects::{ContentId, UserId};

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    ReactionUpdated(ReactionUpdatedEvent),
    CommentCreated(CommentCreatedEvent),
    ContentRemoved(ContentRemovedEvent),
    NotificationCreated(NotificationCreatedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionUpdated(_) => "REACTION_UPDATED",
            Self::CommentCreated(_) => "COMMENT_CREATED",
            Self::ContentRemoved(_) => "CONTENT_REMOVED",
            Self::NotificationCreated(_) => "NOTIFICATION_CREATED",
        }
    }

    /// Get the event timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ReactionUpdated(e) => e.timestamp,
            Self::CommentCreated(e) => e.timestamp,
            Self::ContentRemoved(e) => e.timestamp,
            Self::NotificationCreated(e) => e.timestamp,
        }
    }
}

// ============================================================================
// Event Payloads
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionUpdatedEvent {
    pub content_id: ContentId,
    pub user_id: UserId,
    pub state: ReactionState,
    pub like_count: i64,
    pub dislike_count: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreatedEvent {
    pub comment_id: ContentId,
    pub post_id: ContentId,
    pub author_id: UserId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRemovedEvent {
    pub content_id: ContentId,
    pub kind: ContentKind,
    pub report_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreatedEvent {
    pub notification: Notification,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl ReactionUpdatedEvent {
    pub fn new(content: &ReactableContent, user_id: UserId) -> Self {
        Self {
            content_id: content.id.clone(),
            state: content.state_of(&user_id),
            user_id,
            like_count: content.tally.like_count,
            dislike_count: content.tally.dislike_count,
            timestamp: Utc::now(),
        }
    }
}

impl CommentCreatedEvent {
    pub fn new(comment_id: ContentId, post_id: ContentId, author_id: UserId) -> Self {
        Self {
            comment_id,
            post_id,
            author_id,
            timestamp: Utc::now(),
        }
    }
}

impl ContentRemovedEvent {
    pub fn new(content_id: ContentId, kind: ContentKind, report_id: Option<Uuid>) -> Self {
        Self {
            content_id,
            kind,
            report_id,
            timestamp: Utc::now(),
        }
    }
}

impl NotificationCreatedEvent {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification,
            timestamp: Utc::now(),
        }
    }
}
