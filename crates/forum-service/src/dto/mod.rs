//! Data transfer objects for service requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for caller input
//! - Response DTOs for serializing results
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreateReportRequest, ListNotificationsQuery, ResolveReportRequest,
};

pub use responses::{
    CommentResponse, NotificationResponse, ReactionResponse, ReactionSummaryResponse,
    ReportResponse, UnreadCountResponse,
};
