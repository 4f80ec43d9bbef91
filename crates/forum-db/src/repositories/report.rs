//! PostgreSQL implementation of ReportRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::Report;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, ReportRepository};
use forum_core::value_objects::{ContentId, UserId};

use crate::models::ReportModel;

use super::error::{clamp_limit, map_db_error, map_unique_violation};

const REPORT_COLUMNS: &str = "id, content_id, content_kind, reporter_id, reason, status, \
                              resolved_by, resolution_note, created_at, resolved_at";

/// PostgreSQL implementation of ReportRepository
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    /// Create a new PgReportRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    #[instrument(skip(self, report), fields(report_id = %report.id))]
    async fn create(&self, report: &Report) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reports (id, content_id, content_kind, reporter_id, reason, status,
                                 resolved_by, resolution_note, created_at, resolved_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(report.id)
        .bind(report.content_id.as_str())
        .bind(report.content_kind.as_str())
        .bind(report.reporter_id.as_str())
        .bind(&report.reason)
        .bind(report.status.as_str())
        .bind(report.resolved_by.as_ref().map(UserId::as_str))
        .bind(report.resolution_note.as_deref())
        .bind(report.created_at)
        .bind(report.resolved_at)
        .execute(&self.pool)
        .await
        // idx_reports_one_pending backs the one-pending-report-per-user rule
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateReport))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Report>> {
        let result = sqlx::query_as::<_, ReportModel>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Report::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending(&self, limit: i64) -> RepoResult<Vec<Report>> {
        let results = sqlx::query_as::<_, ReportModel>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE status = 'pending' \
             ORDER BY created_at LIMIT $1"
        ))
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Report::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_pending_by_content(&self, content_id: &ContentId) -> RepoResult<Vec<Report>> {
        let results = sqlx::query_as::<_, ReportModel>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE content_id = $1 AND status = 'pending' \
             ORDER BY created_at"
        ))
        .bind(content_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Report::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_pending_by_reporter(
        &self,
        content_id: &ContentId,
        reporter_id: &UserId,
    ) -> RepoResult<Option<Report>> {
        let result = sqlx::query_as::<_, ReportModel>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports \
             WHERE content_id = $1 AND reporter_id = $2 AND status = 'pending'"
        ))
        .bind(content_id.as_str())
        .bind(reporter_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Report::try_from).transpose()
    }

    #[instrument(skip(self, report), fields(report_id = %report.id))]
    async fn update(&self, report: &Report) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET status = $2, resolved_by = $3, resolution_note = $4, resolved_at = $5
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(report.id)
        .bind(report.status.as_str())
        .bind(report.resolved_by.as_ref().map(UserId::as_str))
        .bind(report.resolution_note.as_deref())
        .bind(report.resolved_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM reports WHERE id = $1)")
                .bind(report.id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        if exists {
            Err(DomainError::ReportAlreadyResolved(report.id))
        } else {
            Err(DomainError::ReportNotFound(report.id))
        }
    }
}
