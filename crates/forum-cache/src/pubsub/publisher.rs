//! Redis Pub/Sub publisher
//!
//! Publishes domain events for the real-time edge to relay to connected
//! clients. Nothing here subscribes.

use forum_core::DomainEvent;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pool::{PushResult, RedisPool};
use crate::pubsub::PubSubChannel;

/// Envelope of every published message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// e.g. "REACTION_UPDATED", "NOTIFICATION_CREATED"
    pub event_type: String,
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<EventTarget>,
}

/// Routing hints for the relay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    /// Sessions of these users should not receive the event
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exclude_users: Vec<String>,
}

impl PubSubEvent {
    /// Wrap a domain event with its routing hints
    ///
    /// The acting user is left out of reaction updates; their client already
    /// holds the result.
    pub fn from_domain(event: &DomainEvent) -> Result<Self, serde_json::Error> {
        let target = match event {
            DomainEvent::ReactionUpdated(e) => Some(EventTarget {
                content_id: Some(e.content_id.to_string()),
                exclude_users: vec![e.user_id.to_string()],
            }),
            DomainEvent::CommentCreated(e) => Some(EventTarget {
                content_id: Some(e.post_id.to_string()),
                exclude_users: Vec::new(),
            }),
            DomainEvent::ContentRemoved(e) => Some(EventTarget {
                content_id: Some(e.content_id.to_string()),
                exclude_users: Vec::new(),
            }),
            DomainEvent::NotificationCreated(_) => None,
        };

        Ok(Self {
            event_type: event.event_type().to_string(),
            data: serde_json::to_value(event)?,
            target,
        })
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone, Debug)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish on the event's channel, returning how many subscribers got it
    pub async fn publish_domain_event(&self, event: &DomainEvent) -> PushResult<u32> {
        let channel = PubSubChannel::for_event(event).to_string();
        let payload = serde_json::to_string(&PubSubEvent::from_domain(event)?)?;

        let mut conn = self.pool.get().await?;
        let receivers: u32 = conn.publish(&channel, &payload).await?;

        debug!(
            channel = %channel,
            event_type = event.event_type(),
            receivers,
            "Published event"
        );

        Ok(receivers)
    }
}
