//! Redis channel naming
//!
//! Inbox updates go to `user:<id>`; everything a page viewer should see
//! live goes to `content:<post or comment id>`.

use std::fmt;

use forum_core::{ContentId, DomainEvent, UserId};

pub const USER_CHANNEL_PREFIX: &str = "user:";
pub const CONTENT_CHANNEL_PREFIX: &str = "content:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// All sessions of one user
    User(UserId),
    /// Everyone viewing a post thread or comment
    Content(ContentId),
}

impl PubSubChannel {
    /// Channel a domain event is published on
    ///
    /// New comments land on their post's channel.
    #[must_use]
    pub fn for_event(event: &DomainEvent) -> Self {
        match event {
            DomainEvent::ReactionUpdated(e) => Self::Content(e.content_id.clone()),
            DomainEvent::CommentCreated(e) => Self::Content(e.post_id.clone()),
            DomainEvent::ContentRemoved(e) => Self::Content(e.content_id.clone()),
            DomainEvent::NotificationCreated(e) => Self::User(e.notification.recipient_id.clone()),
        }
    }
}

impl fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "{USER_CHANNEL_PREFIX}{id}"),
            Self::Content(id) => write!(f, "{CONTENT_CHANNEL_PREFIX}{id}"),
        }
    }
}
