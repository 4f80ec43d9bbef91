//! Content database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for content table
#[derive(Debug, Clone, FromRow)]
pub struct ContentModel {
    pub id: String,
    pub kind: String,
    pub author_id: String,
    pub post_id: Option<String>,
    pub body: String,
    pub like_count: i64,
    pub liked_by: Vec<String>,
    pub dislike_count: i64,
    pub disliked_by: Vec<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}
