//! Entity <-> model mappers
//!
//! Stored enum columns are plain text; rows holding an unknown value are
//! reported as database errors rather than silently coerced.

mod content;
mod notification;
mod report;

pub use content::ids_to_strings;

use forum_core::DomainError;

fn unknown_value(column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("unknown {column} value: {value}"))
}
