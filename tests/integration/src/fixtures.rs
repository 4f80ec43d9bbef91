//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use forum_core::{Actor, ContentId, Role};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Content id unique across test runs sharing a database
pub fn unique_id(prefix: &str) -> ContentId {
    ContentId::new(format!(
        "{prefix}-{}-{}",
        unique_suffix(),
        uuid::Uuid::new_v4().simple()
    ))
}

pub fn alice() -> Actor {
    Actor::member("alice").with_display_name("Alice")
}

pub fn bob() -> Actor {
    Actor::member("bob").with_display_name("Bob")
}

pub fn moderator() -> Actor {
    Actor::member("moderator").with_role(Role::Moderator)
}

/// Distinct members named `reader-0`, `reader-1`, ...
pub fn readers(count: usize) -> Vec<Actor> {
    (0..count)
        .map(|i| Actor::member(format!("reader-{i}-{}", unique_suffix())))
        .collect()
}
