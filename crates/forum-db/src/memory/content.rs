//! In-memory ContentStore

use async_trait::async_trait;
use dashmap::DashMap;

use forum_core::entities::ReactableContent;
use forum_core::error::DomainError;
use forum_core::traits::{ContentStore, ReactionWrite, RepoResult, TallyUpdate};
use forum_core::value_objects::ContentId;

/// ContentStore backed by a concurrent map
///
/// `run_transaction` yields between its read and its conditional write, so
/// concurrent writers genuinely interleave and lose version races the same
/// way they would against PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    items: DashMap<ContentId, ReactableContent>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn get(&self, id: &ContentId) -> RepoResult<Option<ReactableContent>> {
        Ok(self.items.get(id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, content: &ReactableContent) -> RepoResult<()> {
        if let Some(post_id) = &content.post_id {
            if !self.items.contains_key(post_id) {
                return Err(DomainError::InvalidParent(post_id.clone()));
            }
        }

        match self.items.entry(content.id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DomainError::ValidationError(
                format!("Content already exists: {}", content.id),
            )),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(content.clone());
                Ok(())
            }
        }
    }

    async fn delete(&self, id: &ContentId) -> RepoResult<bool> {
        let removed = self.items.remove(id).is_some();
        if removed {
            // Comments go with their post
            self.items
                .retain(|_, item| item.post_id.as_ref() != Some(id));
        }
        Ok(removed)
    }

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

        tokio::task::yield_now().await;

        let mut entry = self
            .items
            .get_mut(id)
            .ok_or_else(|| DomainError::ContentNotFound(id.clone()))?;
        if entry.version != before.version {
            return Err(DomainError::WriteConflict(id.clone()));
        }
        entry.tally = tally;
        entry.version += 1;
        let after = entry.value().clone();

        Ok(ReactionWrite { before, after })
    }
}
