//! Report entity - a user's complaint about a content item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::ContentKind;
use crate::error::DomainError;
use crate::value_objects::{ContentId, UserId};

/// Lifecycle of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Dismissed,
    ContentRemoved,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dismissed => "dismissed",
            Self::ContentRemoved => "content_removed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "dismissed" => Some(Self::Dismissed),
            "content_removed" => Some(Self::ContentRemoved),
            _ => None,
        }
    }
}

/// Moderator decision on a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportAction {
    Dismiss,
    RemoveContent,
}

impl ReportAction {
    /// Status a report ends in after this action
    pub fn resulting_status(self) -> ReportStatus {
        match self {
            Self::Dismiss => ReportStatus::Dismissed,
            Self::RemoveContent => ReportStatus::ContentRemoved,
        }
    }
}

/// Report entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub content_id: ContentId,
    pub content_kind: ContentKind,
    pub reporter_id: UserId,
    pub reason: String,
    pub status: ReportStatus,
    pub resolved_by: Option<UserId>,
    pub resolution_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Report {
    /// Create a new pending report
    pub fn new(
        content_id: ContentId,
        content_kind: ContentKind,
        reporter_id: UserId,
        reason: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_id,
            content_kind,
            reporter_id,
            reason,
            status: ReportStatus::Pending,
            resolved_by: None,
            resolution_note: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ReportStatus::Pending
    }

    /// Close the report with a final status
    pub fn close(
        &mut self,
        status: ReportStatus,
        moderator_id: &UserId,
        note: Option<String>,
    ) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::ReportAlreadyResolved(self.id));
        }
        self.status = status;
        self.resolved_by = Some(moderator_id.clone());
        self.resolution_note = note;
        self.resolved_at = Some(Utc::now());
        Ok(())
    }
}
