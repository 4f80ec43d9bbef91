//! Comment, inbox and moderation integration tests
//!
//! Run with: cargo test -p integration-tests --test moderation_tests

use forum_core::entities::{NotificationKind, ReportAction, ReportStatus};
use forum_core::{DomainError, UserId};
use forum_service::dto::{
    CreateCommentRequest, CreateReportRequest, ListNotificationsQuery, ResolveReportRequest,
};
use forum_service::ServiceError;
use integration_tests::{alice, bob, check_test_env, moderator, unique_suffix, TestForum};

fn comment(body: &str) -> CreateCommentRequest {
    CreateCommentRequest {
        body: body.to_string(),
    }
}

fn reason(text: &str) -> CreateReportRequest {
    CreateReportRequest {
        reason: text.to_string(),
    }
}

async fn removal_workflow(forum: &TestForum) {
    let author = format!("alice-{}", unique_suffix());
    let reporter_a = UserId::new(format!("bob-{}", unique_suffix()));
    let reporter_b = UserId::new(format!("carol-{}", unique_suffix()));
    let post = forum.seed_post(&author).await.unwrap();

    let reply = forum
        .comments()
        .add_comment(&post, &bob(), comment("Buy cheap watches here"))
        .await
        .unwrap();

    let first = forum
        .reports()
        .file_report(&reporter_a, &reply.id, reason("Spam link"))
        .await
        .unwrap();
    forum
        .reports()
        .file_report(&reporter_b, &reply.id, reason("Advertising"))
        .await
        .unwrap();

    let resolved = forum
        .reports()
        .resolve(
            &moderator(),
            first.id,
            ResolveReportRequest {
                action: ReportAction::RemoveContent,
                note: Some("Spam".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(resolved.status, ReportStatus::ContentRemoved);
    assert_eq!(resolved.resolution_note.as_deref(), Some("Spam"));
    assert!(forum
        .ctx
        .content_store()
        .get(&reply.id)
        .await
        .unwrap()
        .is_none());
    assert!(forum.ctx.content_store().get(&post).await.unwrap().is_some());

    let pending = forum
        .ctx
        .report_repo()
        .find_pending_by_content(&reply.id)
        .await
        .unwrap();
    assert!(pending.is_empty());

    for reporter in [&reporter_a, &reporter_b] {
        let inbox = forum
            .notifications()
            .list_notifications(reporter, ListNotificationsQuery::default())
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::ReportResolved);
    }

    // Removed content can no longer be reported
    let err = forum
        .reports()
        .file_report(&reporter_a, &reply.id, reason("Still spam"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_removal_workflow_in_memory() {
    let forum = TestForum::in_memory().unwrap();
    removal_workflow(&forum).await;
}

#[tokio::test]
async fn test_removal_workflow_postgres() {
    if !check_test_env() {
        return;
    }
    let forum = TestForum::postgres().await.expect("Failed to connect");
    removal_workflow(&forum).await;
}

#[tokio::test]
async fn test_members_cannot_moderate() {
    let forum = TestForum::in_memory().unwrap();
    let post = forum.seed_post("alice").await.unwrap();
    let filed = forum
        .reports()
        .file_report(&UserId::new("bob"), &post, reason("Off-topic"))
        .await
        .unwrap();

    let err = forum
        .reports()
        .resolve(
            &bob(),
            filed.id,
            ResolveReportRequest {
                action: ReportAction::Dismiss,
                note: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::MissingPermission(_))
    ));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn test_comment_thread_inbox_lifecycle() {
    let forum = TestForum::in_memory().unwrap();
    let post = forum.seed_post("alice").await.unwrap();
    let alice_id = alice().user_id;

    for body in ["First!", "Lovely light", "Which beach is this?"] {
        forum
            .comments()
            .add_comment(&post, &bob(), comment(body))
            .await
            .unwrap();
    }
    forum
        .comments()
        .add_comment(&post, &alice(), comment("Vazon, at dusk"))
        .await
        .unwrap();

    let inbox = forum.notifications();
    assert_eq!(inbox.unread_count(&alice_id).await.unwrap().unread, 3);

    let listed = inbox
        .list_notifications(&alice_id, ListNotificationsQuery::default())
        .await
        .unwrap();
    assert!(listed
        .iter()
        .all(|n| n.kind == NotificationKind::Comment && n.message == "Bob commented on your post"));

    inbox.mark_read(&alice_id, listed[0].id).await.unwrap();
    assert_eq!(inbox.unread_count(&alice_id).await.unwrap().unread, 2);

    assert_eq!(inbox.mark_all_read(&alice_id).await.unwrap(), 2);
    let unread = inbox
        .list_notifications(
            &alice_id,
            ListNotificationsQuery {
                unread_only: true,
                ..ListNotificationsQuery::default()
            },
        )
        .await
        .unwrap();
    assert!(unread.is_empty());
}

#[tokio::test]
async fn test_deleting_post_author_comment_by_stranger_is_refused() {
    let forum = TestForum::in_memory().unwrap();
    let post = forum.seed_post("alice").await.unwrap();
    let reply = forum
        .comments()
        .add_comment(&post, &alice(), comment("Pinned: be kind"))
        .await
        .unwrap();

    let err = forum
        .comments()
        .delete_comment(&reply.id, &bob())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotContentAuthor)
    ));

    forum
        .comments()
        .delete_comment(&reply.id, &alice())
        .await
        .unwrap();
}
