//! Integration test utilities for the forum backend
//!
//! This crate provides helpers for driving the service layer end to end,
//! against in-memory stores or a live PostgreSQL database.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
