//! Report database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for reports table
#[derive(Debug, Clone, FromRow)]
pub struct ReportModel {
    pub id: Uuid,
    pub content_id: String,
    pub content_kind: String,
    pub reporter_id: String,
    pub reason: String,
    pub status: String,
    pub resolved_by: Option<String>,
    pub resolution_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}
