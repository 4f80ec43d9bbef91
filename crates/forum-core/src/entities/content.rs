//! Content entity - a post or a comment that users can react to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ReactionState, ReactionTally};
use crate::error::DomainError;
use crate::value_objects::{ContentId, UserId};

/// Maximum body length for posts and comments
pub const MAX_BODY_LENGTH: usize = 2000;

/// Kind of content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Comment,
}

impl ContentKind {
    /// Lowercase name, as stored
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }

    /// Parse the stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "post" => Some(Self::Post),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

/// Content item with its reaction tally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactableContent {
    pub id: ContentId,
    pub kind: ContentKind,
    pub author_id: UserId,
    /// Parent post, set for comments only
    pub post_id: Option<ContentId>,
    pub body: String,
    pub tally: ReactionTally,
    /// Optimistic concurrency token, bumped on every reaction write
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl ReactableContent {
    /// Create a new post with no reactions
    pub fn new_post(id: ContentId, author_id: UserId, body: String) -> Self {
        Self {
            id,
            kind: ContentKind::Post,
            author_id,
            post_id: None,
            body,
            tally: ReactionTally::default(),
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a new comment on a post with no reactions
    pub fn new_comment(id: ContentId, post_id: ContentId, author_id: UserId, body: String) -> Self {
        Self {
            id,
            kind: ContentKind::Comment,
            author_id,
            post_id: Some(post_id),
            body,
            tally: ReactionTally::default(),
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Check the reaction tally of a freshly read document
    pub fn validate(&self) -> Result<(), DomainError> {
        self.tally
            .validate()
            .map_err(|violation| DomainError::DataIntegrity {
                content_id: self.id.clone(),
                violation,
            })
    }

    #[inline]
    pub fn is_post(&self) -> bool {
        self.kind == ContentKind::Post
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// Reaction state of a user on this item
    #[inline]
    pub fn state_of(&self, user_id: &UserId) -> ReactionState {
        self.tally.state_of(user_id)
    }

    /// Post the item belongs to (itself for posts)
    pub fn thread_id(&self) -> &ContentId {
        self.post_id.as_ref().unwrap_or(&self.id)
    }

    /// Deep link used in notifications
    pub fn link(&self) -> String {
        match self.kind {
            ContentKind::Post => format!("/posts/{}", self.id),
            ContentKind::Comment => format!("/posts/{}#comment-{}", self.thread_id(), self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TallyViolation;

    #[test]
    fn test_post_link() {
        let post = ReactableContent::new_post(
            ContentId::new("P1"),
            UserId::new("alice"),
            "Hello Guernsey".to_string(),
        );
        assert!(post.is_post());
        assert_eq!(post.thread_id(), &ContentId::new("P1"));
        assert_eq!(post.link(), "/posts/P1");
    }

    #[test]
    fn test_comment_link() {
        let comment = ReactableContent::new_comment(
            ContentId::new("C1"),
            ContentId::new("P1"),
            UserId::new("bob"),
            "Agreed".to_string(),
        );
        assert!(!comment.is_post());
        assert_eq!(comment.thread_id(), &ContentId::new("P1"));
        assert_eq!(comment.link(), "/posts/P1#comment-C1");
    }

    #[test]
    fn test_validate_reports_content_id() {
        let mut post = ReactableContent::new_post(
            ContentId::new("P1"),
            UserId::new("alice"),
            String::new(),
        );
        post.tally.like_count = 1;

        match post.validate() {
            Err(DomainError::DataIntegrity {
                content_id,
                violation,
            }) => {
                assert_eq!(content_id, ContentId::new("P1"));
                assert!(matches!(violation, TallyViolation::CountMismatch { .. }));
            }
            other => panic!("expected data integrity error, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(ContentKind::parse("post"), Some(ContentKind::Post));
        assert_eq!(ContentKind::parse(ContentKind::Comment.as_str()), Some(ContentKind::Comment));
        assert_eq!(ContentKind::parse("poll"), None);
    }
}
