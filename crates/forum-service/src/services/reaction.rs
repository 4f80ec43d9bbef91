//! Reaction service
//!
//! The reaction ledger: toggles likes and dislikes on posts and comments and
//! notifies authors of new likes.
//!
//! Each toggle is one read-modify-write of a single document, committed with
//! a version check by the content store. A lost race is retried with jittered
//! exponential backoff until the configured attempt budget runs out.

use std::time::Duration;

use forum_core::entities::{
    NewNotification, ReactableContent, Reaction, ReactionTally, Transition,
};
use forum_core::events::ReactionUpdatedEvent;
use forum_core::traits::ReactionWrite;
use forum_core::{ContentId, DomainError, DomainEvent, UserId};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::dto::{ReactionResponse, ReactionSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the user's like on a post or comment
    ///
    /// Liking clears an existing dislike in the same write. A new like on
    /// someone else's content notifies its author; `display_name` fills the
    /// message and defaults to "Someone".
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        content_id: &ContentId,
        user_id: &UserId,
        display_name: Option<&str>,
    ) -> ServiceResult<ReactionResponse> {
        let (write, transition) = self.toggle(content_id, user_id, Reaction::Like).await?;

        if transition.is_new_like() && !write.after.is_authored_by(user_id) {
            self.notify_author(&write.after, display_name).await;
        }

        Ok(self.finish(write, user_id, transition).await)
    }

    /// Toggle the user's dislike on a post or comment
    ///
    /// Disliking clears an existing like in the same write. Never notifies.
    #[instrument(skip(self))]
    pub async fn toggle_dislike(
        &self,
        content_id: &ContentId,
        user_id: &UserId,
    ) -> ServiceResult<ReactionResponse> {
        let (write, transition) = self.toggle(content_id, user_id, Reaction::Dislike).await?;
        Ok(self.finish(write, user_id, transition).await)
    }

    /// Current counts and the user's own reaction state
    #[instrument(skip(self))]
    pub async fn reaction_state(
        &self,
        content_id: &ContentId,
        user_id: &UserId,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let content = self
            .ctx
            .content_store()
            .get(content_id)
            .await?
            .ok_or_else(|| DomainError::ContentNotFound(content_id.clone()))?;
        content.validate()?;

        Ok(ReactionSummaryResponse {
            state: content.state_of(user_id),
            content_id: content.id,
            like_count: content.tally.like_count,
            dislike_count: content.tally.dislike_count,
        })
    }

    /// Commit one toggle, retrying lost version races
    async fn toggle(
        &self,
        content_id: &ContentId,
        user_id: &UserId,
        reaction: Reaction,
    ) -> ServiceResult<(ReactionWrite, Transition)> {
        let config = *self.ctx.reaction_config();
        let update = |doc: &ReactableContent| -> Result<ReactionTally, DomainError> {
            doc.tally
                .toggle(user_id, reaction)
                .map(|(tally, _)| tally)
                .map_err(|violation| DomainError::DataIntegrity {
                    content_id: doc.id.clone(),
                    violation,
                })
        };

        let mut attempt = 1;
        let write = loop {
            match self
                .ctx
                .content_store()
                .run_transaction(content_id, &update)
                .await
            {
                Ok(write) => break write,
                Err(DomainError::WriteConflict(_)) if attempt < config.max_attempts => {
                    let delay = jittered(config.backoff(attempt));
                    debug!(
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Reaction write lost a version race, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(DomainError::WriteConflict(_)) => {
                    warn!(attempts = attempt, "Reaction write retries exhausted");
                    return Err(DomainError::ReactionConflict {
                        content_id: content_id.clone(),
                        attempts: attempt,
                    }
                    .into());
                }
                Err(e) => return Err(e.into()),
            }
        };

        let transition = Transition {
            from: write.before.state_of(user_id),
            to: write.after.state_of(user_id),
        };

        info!(
            %reaction,
            from = ?transition.from,
            to = ?transition.to,
            like_count = write.after.tally.like_count,
            dislike_count = write.after.tally.dislike_count,
            attempts = attempt,
            "Reaction toggled"
        );

        Ok((write, transition))
    }

    /// Best-effort like notification to the content author
    async fn notify_author(&self, content: &ReactableContent, display_name: Option<&str>) {
        let notification = NewNotification::like(
            content.author_id.clone(),
            content.kind,
            display_name,
            content.link(),
        );
        if let Err(e) = self.ctx.dispatcher().notify(notification).await {
            warn!(
                content_id = %content.id,
                author_id = %content.author_id,
                error = %e,
                "Failed to notify author of new like"
            );
        }
    }

    async fn finish(
        &self,
        write: ReactionWrite,
        user_id: &UserId,
        transition: Transition,
    ) -> ReactionResponse {
        self.ctx
            .publish(DomainEvent::ReactionUpdated(ReactionUpdatedEvent::new(
                &write.after,
                user_id.clone(),
            )))
            .await;

        ReactionResponse {
            is_new_like: transition.is_new_like(),
            ..ReactionResponse::from(&write.after.tally)
        }
    }
}

/// Spread retries out: somewhere between half and all of the backoff
fn jittered(backoff: Duration) -> Duration {
    let ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX);
    if ms < 2 {
        return backoff;
    }
    let half = ms / 2;
    Duration::from_millis(half + rand::thread_rng().gen_range(0..=ms - half))
}
