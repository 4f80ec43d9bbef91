//! Notification entity <-> model mapper

use forum_core::entities::{Notification, NotificationKind};
use forum_core::value_objects::UserId;
use forum_core::DomainError;

use crate::models::NotificationModel;

use super::unknown_value;

/// Convert NotificationModel to Notification entity
impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let kind =
            NotificationKind::parse(&model.kind).ok_or_else(|| unknown_value("kind", &model.kind))?;

        Ok(Notification {
            id: model.id,
            recipient_id: UserId::new(model.recipient_id),
            kind,
            message: model.message,
            link: model.link,
            read: model.read,
            created_at: model.created_at,
        })
    }
}
