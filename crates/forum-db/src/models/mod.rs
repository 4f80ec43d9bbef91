//! Database models - SQLx-compatible structs for PostgreSQL tables

mod content;
mod notification;
mod report;

pub use content::ContentModel;
pub use notification::NotificationModel;
pub use report::ReportModel;
