//! Notification entity - an inbox entry for a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::ContentKind;
use crate::value_objects::UserId;

/// Display name used when the acting user did not supply one
pub const ANONYMOUS_DISPLAY_NAME: &str = "Someone";

/// What the notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PostLike,
    CommentLike,
    Comment,
    ReportResolved,
}

impl NotificationKind {
    /// Like notification for the given content kind
    pub fn like_of(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Post => Self::PostLike,
            ContentKind::Comment => Self::CommentLike,
        }
    }

    /// Snake-case name, as stored
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostLike => "post_like",
            Self::CommentLike => "comment_like",
            Self::Comment => "comment",
            Self::ReportResolved => "report_resolved",
        }
    }

    /// Parse the stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "post_like" => Some(Self::PostLike),
            "comment_like" => Some(Self::CommentLike),
            "comment" => Some(Self::Comment),
            "report_resolved" => Some(Self::ReportResolved),
            _ => None,
        }
    }
}

/// Notification to be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient_id: UserId,
    pub kind: NotificationKind,
    pub message: String,
    pub link: String,
}

impl NewNotification {
    pub fn new(
        recipient_id: UserId,
        kind: NotificationKind,
        message: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            kind,
            message: message.into(),
            link: link.into(),
        }
    }

    /// "<name> liked your post" / "<name> liked your comment"
    pub fn like(
        recipient_id: UserId,
        content_kind: ContentKind,
        actor_name: Option<&str>,
        link: impl Into<String>,
    ) -> Self {
        let name = display_name(actor_name);
        Self::new(
            recipient_id,
            NotificationKind::like_of(content_kind),
            format!("{name} liked your {}", content_kind.as_str()),
            link,
        )
    }
}

/// Persisted notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: UserId,
    pub kind: NotificationKind,
    pub message: String,
    pub link: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Materialize a dispatched notification as an unread inbox entry
    pub fn from_new(new: NewNotification) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id: new.recipient_id,
            kind: new.kind,
            message: new.message,
            link: new.link,
            read: false,
            created_at: Utc::now(),
        }
    }
}

/// Trimmed display name, or the anonymous fallback
pub fn display_name(name: Option<&str>) -> &str {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(ANONYMOUS_DISPLAY_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_message() {
        let n = NewNotification::like(
            UserId::new("alice"),
            ContentKind::Post,
            Some("Bob"),
            "/posts/P1",
        );
        assert_eq!(n.kind, NotificationKind::PostLike);
        assert_eq!(n.message, "Bob liked your post");
        assert_eq!(n.link, "/posts/P1");
    }

    #[test]
    fn test_like_message_without_name() {
        let n = NewNotification::like(UserId::new("alice"), ContentKind::Comment, Some("  "), "/x");
        assert_eq!(n.kind, NotificationKind::CommentLike);
        assert_eq!(n.message, "Someone liked your comment");
    }

    #[test]
    fn test_kind_names() {
        for kind in [
            NotificationKind::PostLike,
            NotificationKind::CommentLike,
            NotificationKind::Comment,
            NotificationKind::ReportResolved,
        ] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.as_str().to_string())
            );
        }
    }

    #[test]
    fn test_from_new_is_unread() {
        let n = Notification::from_new(NewNotification::new(
            UserId::new("alice"),
            NotificationKind::Comment,
            "Bob commented on your post",
            "/posts/P1",
        ));
        assert!(!n.read);
        assert_eq!(n.recipient_id, UserId::new("alice"));
    }
}
