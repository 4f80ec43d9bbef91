//! Business logic services
//!
//! Each service borrows a [`ServiceContext`] and orchestrates domain
//! operations over the stores, the notification dispatcher and the publisher.

pub mod comment;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod notification;
pub mod reaction;
pub mod report;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dispatcher::StoreAndPushDispatcher;
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use reaction::ReactionService;
pub use report::ReportService;
