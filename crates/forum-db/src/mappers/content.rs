//! Content entity <-> model mapper

use forum_core::entities::{ContentKind, ReactableContent, ReactionTally};
use forum_core::value_objects::{ContentId, UserId};
use forum_core::DomainError;

use crate::models::ContentModel;

use super::unknown_value;

/// Convert ContentModel to ReactableContent entity
impl TryFrom<ContentModel> for ReactableContent {
    type Error = DomainError;

    fn try_from(model: ContentModel) -> Result<Self, Self::Error> {
        let kind = ContentKind::parse(&model.kind).ok_or_else(|| unknown_value("kind", &model.kind))?;

        Ok(ReactableContent {
            id: ContentId::new(model.id),
            kind,
            author_id: UserId::new(model.author_id),
            post_id: model.post_id.map(ContentId::new),
            body: model.body,
            tally: ReactionTally {
                like_count: model.like_count,
                liked_by: model.liked_by.into_iter().map(UserId::new).collect(),
                dislike_count: model.dislike_count,
                disliked_by: model.disliked_by.into_iter().map(UserId::new).collect(),
            },
            version: model.version,
            created_at: model.created_at,
        })
    }
}

/// Flatten user IDs for a TEXT[] bind
pub fn ids_to_strings(ids: &[UserId]) -> Vec<String> {
    ids.iter().map(|id| id.as_str().to_owned()).collect()
}
