//! Report service
//!
//! Members flag posts and comments; moderators review the queue and either
//! dismiss a report or remove the reported content.

use forum_core::entities::{NewNotification, NotificationKind, Report, ReportAction, ReportStatus};
use forum_core::events::ContentRemovedEvent;
use forum_core::{Actor, ContentId, DomainError, DomainEvent, UserId};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CreateReportRequest, ReportResponse, ResolveReportRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

const MODERATE_CONTENT: &str = "MODERATE_CONTENT";

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// File a report against a post or comment
    ///
    /// A reporter may hold one pending report per content item.
    #[instrument(skip(self, request))]
    pub async fn file_report(
        &self,
        reporter_id: &UserId,
        content_id: &ContentId,
        request: CreateReportRequest,
    ) -> ServiceResult<ReportResponse> {
        request.validate()?;

        let content = self
            .ctx
            .content_store()
            .get(content_id)
            .await?
            .ok_or_else(|| DomainError::ContentNotFound(content_id.clone()))?;

        if self
            .ctx
            .report_repo()
            .find_pending_by_reporter(content_id, reporter_id)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateReport.into());
        }

        let report = Report::new(
            content.id,
            content.kind,
            reporter_id.clone(),
            request.reason.trim().to_string(),
        );
        self.ctx.report_repo().create(&report).await?;

        info!(report_id = %report.id, "Report filed");

        Ok(ReportResponse::from(report))
    }

    /// Oldest pending reports first
    #[instrument(skip(self, actor), fields(actor_id = %actor.user_id))]
    pub async fn list_pending(&self, actor: &Actor, limit: i64) -> ServiceResult<Vec<ReportResponse>> {
        require_moderator(actor)?;

        let reports = self.ctx.report_repo().find_pending(limit).await?;
        Ok(reports.into_iter().map(ReportResponse::from).collect())
    }

    /// Close a pending report
    ///
    /// Removing the content also closes every other pending report on it, and
    /// each closed report's filer is told the outcome.
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.user_id, action = ?request.action))]
    pub async fn resolve(
        &self,
        actor: &Actor,
        report_id: Uuid,
        request: ResolveReportRequest,
    ) -> ServiceResult<ReportResponse> {
        require_moderator(actor)?;
        request.validate()?;

        let mut report = self
            .ctx
            .report_repo()
            .find_by_id(report_id)
            .await?
            .ok_or(DomainError::ReportNotFound(report_id))?;

        let status = request.action.resulting_status();
        report.close(status, &actor.user_id, request.note.clone())?;

        // A failed delete must leave the report pending
        let removing = request.action == ReportAction::RemoveContent;
        if removing {
            self.delete_content(&report.content_id).await?;
        }
        self.ctx.report_repo().update(&report).await?;

        let mut closed = vec![report.clone()];
        if removing {
            closed.extend(self.close_remaining(&report, actor, request.note).await?);
        }

        info!(
            report_id = %report.id,
            content_id = %report.content_id,
            closed = closed.len(),
            "Report resolved"
        );

        for resolved in &closed {
            self.notify_reporter(resolved).await;
        }

        Ok(ReportResponse::from(report))
    }

    async fn delete_content(&self, content_id: &ContentId) -> ServiceResult<()> {
        if !self.ctx.content_store().delete(content_id).await? {
            warn!(content_id = %content_id, "Reported content already gone");
        }
        Ok(())
    }

    /// Close the other pending reports on removed content
    async fn close_remaining(
        &self,
        report: &Report,
        actor: &Actor,
        note: Option<String>,
    ) -> ServiceResult<Vec<Report>> {
        let mut closed = Vec::new();
        for mut other in self
            .ctx
            .report_repo()
            .find_pending_by_content(&report.content_id)
            .await?
        {
            other.close(ReportStatus::ContentRemoved, &actor.user_id, note.clone())?;
            match self.ctx.report_repo().update(&other).await {
                Ok(()) => closed.push(other),
                // Closed by another moderator since the listing
                Err(DomainError::ReportAlreadyResolved(id)) => {
                    debug!(report_id = %id, "Report already closed, skipping");
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.ctx
            .publish(DomainEvent::ContentRemoved(ContentRemovedEvent::new(
                report.content_id.clone(),
                report.content_kind,
                Some(report.id),
            )))
            .await;

        Ok(closed)
    }

    async fn notify_reporter(&self, report: &Report) {
        let outcome = match report.status {
            ReportStatus::ContentRemoved => "the content was removed",
            _ => "no action was taken",
        };
        let notification = NewNotification::new(
            report.reporter_id.clone(),
            NotificationKind::ReportResolved,
            format!(
                "Your report on a {} was reviewed: {outcome}",
                report.content_kind.as_str()
            ),
            format!("/reports/{}", report.id),
        );
        if let Err(e) = self.ctx.dispatcher().notify(notification).await {
            warn!(report_id = %report.id, error = %e, "Failed to notify reporter");
        }
    }
}

fn require_moderator(actor: &Actor) -> Result<(), DomainError> {
    if actor.can_moderate() {
        Ok(())
    } else {
        Err(DomainError::MissingPermission(MODERATE_CONTENT.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use forum_core::entities::ReactableContent;
    use forum_core::traits::{
        ContentStore, NotificationRepository, ReactionWrite, RepoResult, TallyUpdate,
    };
    use forum_core::Role;
    use forum_db::{InMemoryContentStore, InMemoryNotificationRepository};

    use crate::services::context::ServiceContextBuilder;
    use crate::services::error::ServiceError;

    struct Fixture {
        ctx: ServiceContext,
        store: Arc<InMemoryContentStore>,
        inbox: Arc<InMemoryNotificationRepository>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryContentStore::new());
        let inbox = Arc::new(InMemoryNotificationRepository::new());
        store
            .create(&ReactableContent::new_post(
                ContentId::new("P1"),
                UserId::new("alice"),
                "Cheap watches".to_string(),
            ))
            .await
            .unwrap();
        let ctx = ServiceContextBuilder::in_memory()
            .content_store(store.clone())
            .notification_repo(inbox.clone())
            .build()
            .unwrap();
        Fixture { ctx, store, inbox }
    }

    fn reason(text: &str) -> CreateReportRequest {
        CreateReportRequest {
            reason: text.to_string(),
        }
    }

    fn moderator() -> Actor {
        Actor::member("mod").with_role(Role::Moderator)
    }

    fn p1() -> ContentId {
        ContentId::new("P1")
    }

    #[tokio::test]
    async fn test_file_report_once_per_reporter() {
        let f = fixture().await;
        let service = ReportService::new(&f.ctx);
        let bob = UserId::new("bob");

        let report = service.file_report(&bob, &p1(), reason(" spam ")).await.unwrap();
        assert_eq!(report.reason, "spam");
        assert_eq!(report.status, ReportStatus::Pending);

        let err = service.file_report(&bob, &p1(), reason("spam again")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::DuplicateReport)));
        assert_eq!(err.status_code(), 409);

        let err = service
            .file_report(&bob, &ContentId::new("gone"), reason("spam"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = service.file_report(&bob, &p1(), reason("x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_queue_requires_moderator() {
        let f = fixture().await;
        let service = ReportService::new(&f.ctx);
        service
            .file_report(&UserId::new("bob"), &p1(), reason("spam"))
            .await
            .unwrap();

        let err = service
            .list_pending(&Actor::member("bob"), 50)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::MissingPermission(_))
        ));

        let admin = Actor::member("root").with_role(Role::Admin);
        assert_eq!(service.list_pending(&admin, 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_keeps_content() {
        let f = fixture().await;
        let service = ReportService::new(&f.ctx);
        let filed = service
            .file_report(&UserId::new("bob"), &p1(), reason("spam"))
            .await
            .unwrap();

        let resolved = service
            .resolve(
                &moderator(),
                filed.id,
                ResolveReportRequest {
                    action: ReportAction::Dismiss,
                    note: Some("Looks fine".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(resolved.status, ReportStatus::Dismissed);
        assert_eq!(resolved.resolved_by, Some(UserId::new("mod")));
        assert!(f.store.get(&p1()).await.unwrap().is_some());

        let inbox = f.inbox.all();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].recipient_id, UserId::new("bob"));
        assert_eq!(inbox[0].kind, NotificationKind::ReportResolved);
        assert_eq!(inbox[0].link, format!("/reports/{}", filed.id));

        let err = service
            .resolve(
                &moderator(),
                filed.id,
                ResolveReportRequest {
                    action: ReportAction::RemoveContent,
                    note: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::ReportAlreadyResolved(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_content_closes_all_reports() {
        let f = fixture().await;
        let service = ReportService::new(&f.ctx);
        let first = service
            .file_report(&UserId::new("bob"), &p1(), reason("spam"))
            .await
            .unwrap();
        service
            .file_report(&UserId::new("carol"), &p1(), reason("scam link"))
            .await
            .unwrap();

        let resolved = service
            .resolve(
                &moderator(),
                first.id,
                ResolveReportRequest {
                    action: ReportAction::RemoveContent,
                    note: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(resolved.status, ReportStatus::ContentRemoved);
        assert!(f.store.get(&p1()).await.unwrap().is_none());
        assert!(service.list_pending(&moderator(), 50).await.unwrap().is_empty());

        for reporter in ["bob", "carol"] {
            let unread = f.inbox.count_unread(&UserId::new(reporter)).await.unwrap();
            assert_eq!(unread, 1, "{reporter} should hear about the removal");
        }
    }

    /// Content store whose deletes fail until switched back on
    struct FlakyDeleteStore {
        inner: InMemoryContentStore,
        fail_deletes: AtomicBool,
    }

    #[async_trait]
    impl ContentStore for FlakyDeleteStore {
        async fn get(&self, id: &ContentId) -> RepoResult<Option<ReactableContent>> {
            self.inner.get(id).await
        }

        async fn create(&self, content: &ReactableContent) -> RepoResult<()> {
            self.inner.create(content).await
        }

        async fn delete(&self, id: &ContentId) -> RepoResult<bool> {
            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(DomainError::DatabaseError("connection reset".to_string()));
            }
            self.inner.delete(id).await
        }

        async fn run_transaction(
            &self,
            id: &ContentId,
            update: TallyUpdate<'_>,
        ) -> RepoResult<ReactionWrite> {
            self.inner.run_transaction(id, update).await
        }
    }

    #[tokio::test]
    async fn test_failed_removal_leaves_report_pending() {
        let store = Arc::new(FlakyDeleteStore {
            inner: InMemoryContentStore::new(),
            fail_deletes: AtomicBool::new(true),
        });
        store
            .create(&ReactableContent::new_post(
                p1(),
                UserId::new("alice"),
                "Cheap watches".to_string(),
            ))
            .await
            .unwrap();
        let inbox = Arc::new(InMemoryNotificationRepository::new());
        let ctx = ServiceContextBuilder::in_memory()
            .content_store(store.clone())
            .notification_repo(inbox.clone())
            .build()
            .unwrap();
        let service = ReportService::new(&ctx);
        let filed = service
            .file_report(&UserId::new("bob"), &p1(), reason("spam"))
            .await
            .unwrap();
        let remove = || ResolveReportRequest {
            action: ReportAction::RemoveContent,
            note: None,
        };

        let err = service.resolve(&moderator(), filed.id, remove()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::DatabaseError(_))
        ));
        assert!(store.get(&p1()).await.unwrap().is_some());
        let pending = service.list_pending(&moderator(), 50).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, filed.id);
        assert!(inbox.all().is_empty());

        // The moderator can retry once the store recovers
        store.fail_deletes.store(false, Ordering::SeqCst);
        let resolved = service.resolve(&moderator(), filed.id, remove()).await.unwrap();
        assert_eq!(resolved.status, ReportStatus::ContentRemoved);
        assert!(store.get(&p1()).await.unwrap().is_none());
        assert_eq!(inbox.all().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_missing_report() {
        let f = fixture().await;
        let err = ReportService::new(&f.ctx)
            .resolve(
                &moderator(),
                Uuid::new_v4(),
                ResolveReportRequest {
                    action: ReportAction::Dismiss,
                    note: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
