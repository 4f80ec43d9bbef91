//! Platform roles and the acting user
//!
//! Authentication happens upstream; the caller hands the service layer an
//! already-verified [`Actor`].

use serde::{Deserialize, Serialize};

use super::UserId;

/// Platform-wide role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Moderator,
    Admin,
}

impl Role {
    /// Moderators and admins may review reports and remove content
    #[inline]
    pub fn can_moderate(self) -> bool {
        matches!(self, Self::Moderator | Self::Admin)
    }

    /// Lowercase name, as stored and logged
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

/// Authenticated user performing an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub role: Role,
}

impl Actor {
    /// Create a regular member
    pub fn member(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            role: Role::Member,
        }
    }

    /// Set the display name used in notification messages
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the role
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Check if the actor may moderate
    #[inline]
    pub fn can_moderate(&self) -> bool {
        self.role.can_moderate()
    }
}
