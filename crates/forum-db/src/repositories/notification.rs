//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::Notification;
use forum_core::traits::{NotificationRepository, RepoResult};
use forum_core::value_objects::UserId;

use crate::models::NotificationModel;

use super::error::{clamp_limit, map_db_error};

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(recipient_id = %notification.recipient_id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, kind, message, link, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.id)
        .bind(notification.recipient_id.as_str())
        .bind(notification.kind.as_str())
        .bind(&notification.message)
        .bind(&notification.link)
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r#"
            SELECT id, recipient_id, kind, message, link, read, created_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Notification::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(
            r#"
            SELECT id, recipient_id, kind, message, link, read, created_at
            FROM notifications
            WHERE recipient_id = $1 AND (NOT $2 OR read = FALSE)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(recipient_id.as_str())
        .bind(unread_only)
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Notification::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, recipient_id: &UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND read = FALSE",
        )
        .bind(recipient_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Uuid, recipient_id: &UserId) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id)
        .bind(recipient_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, recipient_id: &UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE recipient_id = $1 AND read = FALSE",
        )
        .bind(recipient_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
