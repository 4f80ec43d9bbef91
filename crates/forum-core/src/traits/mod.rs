//! Ports implemented by the infrastructure layer

mod dispatcher;
mod repositories;

pub use dispatcher::NotificationDispatcher;
pub use repositories::{
    ContentStore, NotificationRepository, ReactionWrite, RepoResult, ReportRepository,
    TallyUpdate,
};
