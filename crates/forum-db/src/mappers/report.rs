//! Report entity <-> model mapper

use forum_core::entities::{ContentKind, Report, ReportStatus};
use forum_core::value_objects::{ContentId, UserId};
use forum_core::DomainError;

use crate::models::ReportModel;

use super::unknown_value;

/// Convert ReportModel to Report entity
impl TryFrom<ReportModel> for Report {
    type Error = DomainError;

    fn try_from(model: ReportModel) -> Result<Self, Self::Error> {
        let content_kind = ContentKind::parse(&model.content_kind)
            .ok_or_else(|| unknown_value("content_kind", &model.content_kind))?;
        let status =
            ReportStatus::parse(&model.status).ok_or_else(|| unknown_value("status", &model.status))?;

        Ok(Report {
            id: model.id,
            content_id: ContentId::new(model.content_id),
            content_kind,
            reporter_id: UserId::new(model.reporter_id),
            reason: model.reason,
            status,
            resolved_by: model.resolved_by.map(UserId::new),
            resolution_note: model.resolution_note,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        })
    }
}
