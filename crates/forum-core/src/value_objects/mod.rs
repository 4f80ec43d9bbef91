//! Value objects - immutable types that represent domain concepts

mod ids;
mod role;

pub use ids::{ContentId, UserId};
pub use role::{Actor, Role};
