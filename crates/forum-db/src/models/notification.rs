//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: Uuid,
    pub recipient_id: String,
    pub kind: String,
    pub message: String,
    pub link: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
