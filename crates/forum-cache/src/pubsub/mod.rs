//! Redis Pub/Sub publishing

mod channels;
mod publisher;

pub use channels::{PubSubChannel, CONTENT_CHANNEL_PREFIX, USER_CHANNEL_PREFIX};
pub use publisher::{EventTarget, PubSubEvent, Publisher};
