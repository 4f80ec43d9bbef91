//! Repository implementations
//!
//! PostgreSQL implementations of the port traits defined in forum-core.

mod content;
mod error;
mod notification;
mod report;

pub use content::PgContentStore;
pub use error::{clamp_limit, map_db_error, map_unique_violation};
pub use notification::PgNotificationRepository;
pub use report::PgReportRepository;
