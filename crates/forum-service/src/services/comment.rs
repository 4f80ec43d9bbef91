//! Comment service
//!
//! Adds comments to posts and tells the post author about them.

use forum_core::entities::{display_name, NewNotification, NotificationKind, ReactableContent};
use forum_core::events::{CommentCreatedEvent, ContentRemovedEvent};
use forum_core::{Actor, ContentId, DomainError, DomainEvent};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment to a post
    #[instrument(skip(self, author, request), fields(author_id = %author.user_id))]
    pub async fn add_comment(
        &self,
        post_id: &ContentId,
        author: &Actor,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        let post = self
            .ctx
            .content_store()
            .get(post_id)
            .await?
            .ok_or_else(|| DomainError::ContentNotFound(post_id.clone()))?;
        if !post.is_post() {
            return Err(DomainError::InvalidParent(post_id.clone()).into());
        }

        let comment = ReactableContent::new_comment(
            ContentId::new(Uuid::new_v4().to_string()),
            post.id.clone(),
            author.user_id.clone(),
            request.body,
        );
        self.ctx.content_store().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %post.id, "Comment created");

        if !post.is_authored_by(&author.user_id) {
            let name = display_name(author.display_name.as_deref());
            let notification = NewNotification::new(
                post.author_id.clone(),
                NotificationKind::Comment,
                format!("{name} commented on your post"),
                comment.link(),
            );
            if let Err(e) = self.ctx.dispatcher().notify(notification).await {
                warn!(
                    post_id = %post.id,
                    error = %e,
                    "Failed to notify post author of comment"
                );
            }
        }

        self.ctx
            .publish(DomainEvent::CommentCreated(CommentCreatedEvent::new(
                comment.id.clone(),
                post.id.clone(),
                author.user_id.clone(),
            )))
            .await;

        Ok(CommentResponse::from(&comment))
    }

    /// Delete a comment
    ///
    /// Only the comment's author or a moderator may delete it.
    #[instrument(skip(self, actor), fields(actor_id = %actor.user_id))]
    pub async fn delete_comment(&self, comment_id: &ContentId, actor: &Actor) -> ServiceResult<()> {
        let comment = self
            .ctx
            .content_store()
            .get(comment_id)
            .await?
            .ok_or_else(|| DomainError::ContentNotFound(comment_id.clone()))?;
        if comment.is_post() {
            return Err(DomainError::ValidationError(format!("{comment_id} is not a comment")).into());
        }
        if !comment.is_authored_by(&actor.user_id) && !actor.can_moderate() {
            return Err(DomainError::NotContentAuthor.into());
        }

        if !self.ctx.content_store().delete(comment_id).await? {
            return Err(DomainError::ContentNotFound(comment_id.clone()).into());
        }

        info!(comment_id = %comment_id, "Comment deleted");

        self.ctx
            .publish(DomainEvent::ContentRemoved(ContentRemovedEvent::new(
                comment.id,
                comment.kind,
                None,
            )))
            .await;

        Ok(())
    }
}
