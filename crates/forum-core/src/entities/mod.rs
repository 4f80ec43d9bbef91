//! Domain entities - core business objects

mod content;
mod notification;
mod reaction;
mod report;

pub use content::{ContentKind, ReactableContent, MAX_BODY_LENGTH};
pub use notification::{
    display_name, NewNotification, Notification, NotificationKind, ANONYMOUS_DISPLAY_NAME,
};
pub use reaction::{Reaction, ReactionState, ReactionTally, TallyViolation, Transition};
pub use report::{Report, ReportAction, ReportStatus};
