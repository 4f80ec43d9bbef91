//! In-memory ReportRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use forum_core::entities::Report;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, ReportRepository};
use forum_core::value_objects::{ContentId, UserId};

use crate::repositories::clamp_limit;

#[derive(Debug, Default)]
pub struct InMemoryReportRepository {
    reports: RwLock<HashMap<Uuid, Report>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending_sorted<F>(&self, filter: F) -> Vec<Report>
    where
        F: Fn(&Report) -> bool,
    {
        let mut found: Vec<Report> = self
            .reports
            .read()
            .values()
            .filter(|r| r.is_pending() && filter(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        found
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn create(&self, report: &Report) -> RepoResult<()> {
        let mut reports = self.reports.write();
        let duplicate = report.is_pending()
            && reports.values().any(|r| {
                r.is_pending()
                    && r.content_id == report.content_id
                    && r.reporter_id == report.reporter_id
            });
        if duplicate {
            return Err(DomainError::DuplicateReport);
        }
        reports.insert(report.id, report.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Report>> {
        Ok(self.reports.read().get(&id).cloned())
    }

    async fn find_pending(&self, limit: i64) -> RepoResult<Vec<Report>> {
        let limit = usize::try_from(clamp_limit(limit)).unwrap_or(usize::MAX);
        let mut found = self.pending_sorted(|_| true);
        found.truncate(limit);
        Ok(found)
    }

    async fn find_pending_by_content(&self, content_id: &ContentId) -> RepoResult<Vec<Report>> {
        Ok(self.pending_sorted(|r| &r.content_id == content_id))
    }

    async fn find_pending_by_reporter(
        &self,
        content_id: &ContentId,
        reporter_id: &UserId,
    ) -> RepoResult<Option<Report>> {
        Ok(self
            .pending_sorted(|r| &r.content_id == content_id && &r.reporter_id == reporter_id)
            .into_iter()
            .next())
    }

    async fn update(&self, report: &Report) -> RepoResult<()> {
        match self.reports.write().get_mut(&report.id) {
            Some(stored) if stored.is_pending() => {
                *stored = report.clone();
                Ok(())
            }
            Some(_) => Err(DomainError::ReportAlreadyResolved(report.id)),
            None => Err(DomainError::ReportNotFound(report.id)),
        }
    }
}
