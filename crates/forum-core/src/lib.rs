//! # forum-core
//!
//! Domain layer containing entities, value objects, the reaction state machine,
//! port traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, cache, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ContentKind, NewNotification, Notification, NotificationKind, ReactableContent, Reaction,
    ReactionState, ReactionTally, Report, ReportAction, ReportStatus, TallyViolation, Transition,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    ContentStore, NotificationDispatcher, NotificationRepository, ReactionWrite, RepoResult,
    ReportRepository, TallyUpdate,
};
pub use value_objects::{Actor, ContentId, Role, UserId};
