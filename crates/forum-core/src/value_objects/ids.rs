//! Identifier newtypes
//!
//! Content and user IDs are opaque strings issued by the document store and
//! the external identity provider respectively. Wrapping them keeps a content
//! ID from ever being passed where a user ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Take the raw identifier
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Check for an empty identifier
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a post or comment
    ContentId
);

string_id!(
    /// Identifier of an authenticated user
    UserId
);
