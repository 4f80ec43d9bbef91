//! Reaction ledger integration tests
//!
//! The in-memory tests always run. The PostgreSQL tests need a database:
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test ledger_tests

use std::sync::Arc;

use async_trait::async_trait;
use forum_core::entities::{NewNotification, NotificationKind, ReactableContent, ReactionState};
use forum_core::traits::{NotificationDispatcher, RepoResult};
use forum_core::{DomainError, UserId};
use forum_service::dto::{CreateCommentRequest, ListNotificationsQuery, NotificationResponse};
use forum_service::{ReactionService, ServiceError};
use futures::future::join_all;
use integration_tests::{
    alice, bob, check_test_env, fast_retries, readers, unique_id, unique_suffix, TestForum,
};

async fn inbox_of(forum: &TestForum, user: &str) -> Vec<NotificationResponse> {
    forum
        .notifications()
        .list_notifications(&UserId::new(user), ListNotificationsQuery::default())
        .await
        .unwrap()
}

// ============================================================================
// Toggle Scenarios
// ============================================================================

async fn like_dislike_like(forum: &TestForum) {
    let author = format!("alice-{}", unique_suffix());
    let post = forum.seed_post(&author).await.unwrap();
    let bob = bob();
    let ledger = forum.reactions();

    let liked = ledger
        .toggle_like(&post, &bob.user_id, bob.display_name.as_deref())
        .await
        .unwrap();
    assert_eq!(liked.like_count, 1);
    assert_eq!(liked.liked_by, vec![bob.user_id.clone()]);
    assert_eq!(liked.dislike_count, 0);
    assert!(liked.disliked_by.is_empty());
    assert_eq!(inbox_of(forum, &author).await.len(), 1);

    let disliked = ledger.toggle_dislike(&post, &bob.user_id).await.unwrap();
    assert_eq!(disliked.like_count, 0);
    assert!(disliked.liked_by.is_empty());
    assert_eq!(disliked.dislike_count, 1);
    assert_eq!(disliked.disliked_by, vec![bob.user_id.clone()]);
    assert_eq!(inbox_of(forum, &author).await.len(), 1);

    let relike = ledger
        .toggle_like(&post, &bob.user_id, bob.display_name.as_deref())
        .await
        .unwrap();
    assert_eq!(relike.like_count, 1);
    assert_eq!(relike.liked_by, vec![bob.user_id.clone()]);
    assert_eq!(relike.dislike_count, 0);
    assert!(relike.disliked_by.is_empty());

    let inbox = inbox_of(forum, &author).await;
    assert_eq!(inbox.len(), 2);
    assert!(inbox.iter().all(|n| n.kind == NotificationKind::PostLike));
    assert!(inbox.iter().all(|n| n.message == "Bob liked your post"));

    let stored = forum.content(&post).await.unwrap();
    assert_eq!(stored.version, 3);
}

#[tokio::test]
async fn test_like_dislike_like_in_memory() {
    let forum = TestForum::in_memory().unwrap();
    like_dislike_like(&forum).await;
}

#[tokio::test]
async fn test_like_dislike_like_postgres() {
    if !check_test_env() {
        return;
    }
    let forum = TestForum::postgres().await.expect("Failed to connect");
    like_dislike_like(&forum).await;
}

async fn like_unlike_like(forum: &TestForum) {
    let author = format!("alice-{}", unique_suffix());
    let post = forum.seed_post(&author).await.unwrap();
    let bob = bob();
    let ledger = forum.reactions();
    let name = bob.display_name.as_deref();

    ledger.toggle_like(&post, &bob.user_id, name).await.unwrap();
    assert_eq!(inbox_of(forum, &author).await.len(), 1);

    let unliked = ledger.toggle_like(&post, &bob.user_id, name).await.unwrap();
    assert_eq!(unliked.like_count, 0);
    assert!(unliked.liked_by.is_empty());
    assert_eq!(inbox_of(forum, &author).await.len(), 1);

    let relike = ledger.toggle_like(&post, &bob.user_id, name).await.unwrap();
    assert_eq!(relike.like_count, 1);
    assert_eq!(relike.liked_by, vec![bob.user_id.clone()]);

    let inbox = inbox_of(forum, &author).await;
    assert_eq!(inbox.len(), 2);
    assert!(inbox.iter().all(|n| n.kind == NotificationKind::PostLike));
    assert!(inbox.iter().all(|n| n.message == "Bob liked your post"));
}

#[tokio::test]
async fn test_like_unlike_like_in_memory() {
    let forum = TestForum::in_memory().unwrap();
    like_unlike_like(&forum).await;
}

#[tokio::test]
async fn test_like_unlike_like_postgres() {
    if !check_test_env() {
        return;
    }
    let forum = TestForum::postgres().await.expect("Failed to connect");
    like_unlike_like(&forum).await;
}

#[tokio::test]
async fn test_unlike_and_self_like_stay_silent() {
    let forum = TestForum::in_memory().unwrap();
    let post = forum.seed_post("alice").await.unwrap();
    let alice = alice();
    let ledger = forum.reactions();

    ledger
        .toggle_like(&post, &alice.user_id, alice.display_name.as_deref())
        .await
        .unwrap();
    let unliked = ledger
        .toggle_like(&post, &alice.user_id, None)
        .await
        .unwrap();

    assert_eq!(unliked.like_count, 0);
    assert!(inbox_of(&forum, "alice").await.is_empty());
}

#[tokio::test]
async fn test_comment_like_reaches_comment_author() {
    let forum = TestForum::in_memory().unwrap();
    let post = forum.seed_post("alice").await.unwrap();
    let comment = forum
        .comments()
        .add_comment(
            &post,
            &bob(),
            CreateCommentRequest {
                body: "Was there this morning".to_string(),
            },
        )
        .await
        .unwrap();

    forum
        .reactions()
        .toggle_like(&comment.id, &UserId::new("alice"), Some("Alice"))
        .await
        .unwrap();

    let inbox = inbox_of(&forum, "bob").await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::CommentLike);
    assert_eq!(inbox[0].message, "Alice liked your comment");
    assert_eq!(inbox[0].link, format!("/posts/{post}#comment-{}", comment.id));

    // Alice also got Bob's comment notification
    assert_eq!(inbox_of(&forum, "alice").await.len(), 1);
}

// ============================================================================
// Concurrency
// ============================================================================

async fn concurrent_likes_are_all_counted(forum: &TestForum, users: usize) {
    let author = format!("alice-{}", unique_suffix());
    let post = forum.seed_post(&author).await.unwrap();
    let readers = readers(users);

    let results = join_all(readers.iter().map(|reader| {
        let ctx = forum.ctx.clone();
        let post = post.clone();
        let user_id = reader.user_id.clone();
        tokio::spawn(async move {
            ReactionService::new(&ctx)
                .toggle_like(&post, &user_id, None)
                .await
                .map(|_| user_id)
        })
    }))
    .await;

    let mut committed = Vec::new();
    for result in results {
        match result.expect("task panicked") {
            Ok(user_id) => committed.push(user_id),
            Err(ServiceError::Domain(DomainError::ReactionConflict { .. })) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(!committed.is_empty());

    let stored = forum.content(&post).await.unwrap();
    stored.validate().unwrap();
    assert_eq!(stored.tally.like_count, committed.len() as i64);
    assert_eq!(stored.version, committed.len() as i64);
    for user_id in &committed {
        assert_eq!(stored.state_of(user_id), ReactionState::Liked);
    }

    assert_eq!(inbox_of(forum, &author).await.len(), committed.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_in_memory() {
    let forum = TestForum::in_memory_with(fast_retries(100), None).unwrap();
    concurrent_likes_are_all_counted(&forum, 40).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_postgres() {
    if !check_test_env() {
        return;
    }
    let forum = TestForum::postgres().await.expect("Failed to connect");
    concurrent_likes_are_all_counted(&forum, 16).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_user_racing_toggles_stays_consistent() {
    let forum = TestForum::in_memory_with(fast_retries(100), None).unwrap();
    let post = forum.seed_post("alice").await.unwrap();

    let results = join_all((0..10).map(|i| {
        let ctx = forum.ctx.clone();
        let post = post.clone();
        tokio::spawn(async move {
            let ledger = ReactionService::new(&ctx);
            let bob = UserId::new("bob");
            if i % 2 == 0 {
                ledger.toggle_like(&post, &bob, None).await
            } else {
                ledger.toggle_dislike(&post, &bob).await
            }
        })
    }))
    .await;

    let committed = results
        .into_iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();

    let stored = forum.content(&post).await.unwrap();
    stored.validate().unwrap();
    assert!(stored.tally.like_count + stored.tally.dislike_count <= 1);
    assert_eq!(stored.version, committed as i64);
}

// ============================================================================
// Failure Handling
// ============================================================================

struct BrokenDispatcher;

#[async_trait]
impl NotificationDispatcher for BrokenDispatcher {
    async fn notify(&self, _notification: NewNotification) -> RepoResult<()> {
        Err(DomainError::NotificationDispatch("inbox offline".to_string()))
    }
}

#[tokio::test]
async fn test_failed_notification_keeps_the_like() {
    let forum = TestForum::in_memory_with(fast_retries(5), Some(Arc::new(BrokenDispatcher)))
        .unwrap();
    let post = forum.seed_post("alice").await.unwrap();

    let liked = forum
        .reactions()
        .toggle_like(&post, &UserId::new("bob"), Some("Bob"))
        .await
        .unwrap();

    assert_eq!(liked.like_count, 1);
    assert_eq!(forum.content(&post).await.unwrap().tally.like_count, 1);
}

#[tokio::test]
async fn test_corrupt_tally_is_reported_not_repaired() {
    let forum = TestForum::in_memory().unwrap();
    let mut corrupt = ReactableContent::new_post(
        unique_id("post"),
        UserId::new("alice"),
        "Imported from the old forum".to_string(),
    );
    corrupt.tally.like_count = 3;
    corrupt.tally.liked_by = vec![UserId::new("bob")];
    forum.ctx.content_store().create(&corrupt).await.unwrap();

    let err = forum
        .reactions()
        .toggle_dislike(&corrupt.id, &UserId::new("carol"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::DataIntegrity { .. })
    ));
    assert_eq!(err.status_code(), 500);

    let err = forum
        .reactions()
        .reaction_state(&corrupt.id, &UserId::new("bob"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::DataIntegrity { .. })
    ));

    assert_eq!(forum.content(&corrupt.id).await.unwrap(), corrupt);
}

#[tokio::test]
async fn test_missing_content_is_not_found() {
    let forum = TestForum::in_memory().unwrap();
    let err = forum
        .reactions()
        .toggle_like(&unique_id("ghost"), &UserId::new("bob"), None)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert!(inbox_of(&forum, "alice").await.is_empty());
}
