//! Reaction tally - the like/dislike state of one content item
//!
//! A user holds at most one reaction per item. Toggling computes the next
//! tally as a pure function of the current one; persisting it atomically is
//! the content store's job.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::value_objects::UserId;

/// Reaction a user can cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    /// The other reaction
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }

    /// State a user ends up in after casting this reaction fresh
    #[inline]
    pub fn as_state(self) -> ReactionState {
        match self {
            Self::Like => ReactionState::Liked,
            Self::Dislike => ReactionState::Disliked,
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => f.write_str("like"),
            Self::Dislike => f.write_str("dislike"),
        }
    }
}

/// Reaction state of one user on one content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

/// Change of a user's reaction state caused by one toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ReactionState,
    pub to: ReactionState,
}

impl Transition {
    /// Entered LIKED from NONE or DISLIKED
    #[inline]
    pub fn is_new_like(&self) -> bool {
        self.to == ReactionState::Liked && self.from != ReactionState::Liked
    }
}

/// Ways a stored tally can break its invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TallyViolation {
    #[error("{reaction} count {count} does not match {members} recorded users")]
    CountMismatch {
        reaction: Reaction,
        count: i64,
        members: usize,
    },

    #[error("user {0} appears more than once in the same reaction list")]
    DuplicateUser(UserId),

    #[error("user {0} both likes and dislikes the content")]
    BothReactions(UserId),
}

/// Aggregate reaction state of a content item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionTally {
    pub like_count: i64,
    pub liked_by: Vec<UserId>,
    pub dislike_count: i64,
    pub disliked_by: Vec<UserId>,
}

impl ReactionTally {
    /// Check the tally invariants
    ///
    /// Counts must equal the list sizes, lists hold no duplicates, and no
    /// user appears in both lists.
    pub fn validate(&self) -> Result<(), TallyViolation> {
        check_count(Reaction::Like, self.like_count, &self.liked_by)?;
        check_count(Reaction::Dislike, self.dislike_count, &self.disliked_by)?;

        unique_members(&self.liked_by)?;
        let dislikers = unique_members(&self.disliked_by)?;

        if let Some(user) = self.liked_by.iter().find(|u| dislikers.contains(u)) {
            return Err(TallyViolation::BothReactions(user.clone()));
        }

        Ok(())
    }

    /// Current state of a user
    ///
    /// Assumes a validated tally.
    pub fn state_of(&self, user_id: &UserId) -> ReactionState {
        if self.liked_by.contains(user_id) {
            ReactionState::Liked
        } else if self.disliked_by.contains(user_id) {
            ReactionState::Disliked
        } else {
            ReactionState::None
        }
    }

    /// Compute the tally after `user_id` toggles `reaction`
    ///
    /// Toggling the reaction a user already holds removes it. Toggling the
    /// other one moves the user across in the same step, so the returned
    /// tally never holds the user in both lists.
    pub fn toggle(
        &self,
        user_id: &UserId,
        reaction: Reaction,
    ) -> Result<(ReactionTally, Transition), TallyViolation> {
        self.validate()?;

        let from = self.state_of(user_id);
        let mut next = self.clone();

        let to = if from == reaction.as_state() {
            next.remove(user_id, reaction);
            ReactionState::None
        } else {
            if from == reaction.opposite().as_state() {
                next.remove(user_id, reaction.opposite());
            }
            next.add(user_id, reaction);
            reaction.as_state()
        };

        Ok((next, Transition { from, to }))
    }

    fn add(&mut self, user_id: &UserId, reaction: Reaction) {
        let (count, members) = self.slot_mut(reaction);
        members.push(user_id.clone());
        *count += 1;
    }

    fn remove(&mut self, user_id: &UserId, reaction: Reaction) {
        let (count, members) = self.slot_mut(reaction);
        let before = members.len();
        members.retain(|u| u != user_id);
        *count -= (before - members.len()) as i64;
    }

    fn slot_mut(&mut self, reaction: Reaction) -> (&mut i64, &mut Vec<UserId>) {
        match reaction {
            Reaction::Like => (&mut self.like_count, &mut self.liked_by),
            Reaction::Dislike => (&mut self.dislike_count, &mut self.disliked_by),
        }
    }
}

fn check_count(reaction: Reaction, count: i64, members: &[UserId]) -> Result<(), TallyViolation> {
    if count < 0 || count as usize != members.len() {
        return Err(TallyViolation::CountMismatch {
            reaction,
            count,
            members: members.len(),
        });
    }
    Ok(())
}

fn unique_members(members: &[UserId]) -> Result<HashSet<&UserId>, TallyViolation> {
    let mut seen = HashSet::with_capacity(members.len());
    for user in members {
        if !seen.insert(user) {
            return Err(TallyViolation::DuplicateUser(user.clone()));
        }
    }
    Ok(seen)
}
