//! # forum-service
//!
//! Application layer: the reaction ledger, comments, notifications and
//! moderation reports, plus the DTOs they speak.

pub mod dto;
pub mod services;

pub use services::{
    CommentService, NotificationService, ReactionService, ReportService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StoreAndPushDispatcher,
};
