//! PostgreSQL implementation of ContentStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::ReactableContent;
use forum_core::error::DomainError;
use forum_core::traits::{ContentStore, ReactionWrite, RepoResult, TallyUpdate};
use forum_core::value_objects::ContentId;

use crate::mappers::ids_to_strings;
use crate::models::ContentModel;

use super::error::{map_db_error, map_unique_violation};

const CONTENT_COLUMNS: &str = "id, kind, author_id, post_id, body, like_count, liked_by, \
                               dislike_count, disliked_by, version, created_at";

/// PostgreSQL implementation of ContentStore
///
/// Reaction writes are a single `UPDATE ... WHERE version = $n`, so the four
/// tally columns change together or not at all.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    /// Create a new PgContentStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &ContentId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM content WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    #[instrument(skip(self))]
    async fn get(&self, id: &ContentId) -> RepoResult<Option<ReactableContent>> {
        let result = sqlx::query_as::<_, ContentModel>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ReactableContent::try_from).transpose()
    }

    #[instrument(skip(self, content), fields(content_id = %content.id))]
    async fn create(&self, content: &ReactableContent) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO content (id, kind, author_id, post_id, body, like_count, liked_by,
                                 dislike_count, disliked_by, version, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(content.id.as_str())
        .bind(content.kind.as_str())
        .bind(content.author_id.as_str())
        .bind(content.post_id.as_ref().map(ContentId::as_str))
        .bind(&content.body)
        .bind(content.tally.like_count)
        .bind(ids_to_strings(&content.tally.liked_by))
        .bind(content.tally.dislike_count)
        .bind(ids_to_strings(&content.tally.disliked_by))
        .bind(content.version)
        .bind(content.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ValidationError(format!("Content already exists: {}", content.id))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ContentId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, update))]
    async fn run_transaction(
        &self,
        id: &ContentId,
        update: TallyUpdate<'_>,
    ) -> RepoResult<ReactionWrite> {
        let before = self
            .get(id)
            .await?
            .ok_or_else(|| DomainError::ContentNotFound(id.clone()))?;
        before.validate()?;

        let tally = update(&before)?;

        let written = sqlx::query_as::<_, ContentModel>(&format!(
            r#"
            UPDATE content
            SET like_count = $3, liked_by = $4, dislike_count = $5, disliked_by = $6,
                version = version + 1
            WHERE id = $1 AND version = $2
            RETURNING {CONTENT_COLUMNS}
            "#
        ))
        .bind(id.as_str())
        .bind(before.version)
        .bind(tally.like_count)
        .bind(ids_to_strings(&tally.liked_by))
        .bind(tally.dislike_count)
        .bind(ids_to_strings(&tally.disliked_by))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match written {
            Some(model) => Ok(ReactionWrite {
                before,
                after: ReactableContent::try_from(model)?,
            }),
            None if self.exists(id).await? => Err(DomainError::WriteConflict(id.clone())),
            None => Err(DomainError::ContentNotFound(id.clone())),
        }
    }
}
