//! In-process implementations of the storage ports
//!
//! Used by tests and by deployments without PostgreSQL. They honour the same
//! contracts as the `Pg*` repositories, including optimistic version checks.

mod content;
mod notification;
mod report;

pub use content::InMemoryContentStore;
pub use notification::InMemoryNotificationRepository;
pub use report::InMemoryReportRepository;
