//! Application error type and its wire representation

use forum_core::DomainError;
use serde::Serialize;

use crate::config::ConfigError;

/// Error surfaced at the edge of the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::Validation(_) => 400,
            Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Retrying the same request may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_transient())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// HTTP status for a domain error
///
/// Corrupt stored state maps to 500 along with infrastructure failures.
#[must_use]
pub fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_authorization() {
        403
    } else if e.is_validation() {
        400
    } else if e.is_conflict() {
        409
    } else {
        500
    }
}

/// JSON body a transport layer sends for an error
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        // Internal details stay in the logs
        let message = match err {
            AppError::Domain(e) if domain_status(e) == 500 => "Internal server error".to_string(),
            _ => err.to_string(),
        };
        Self {
            code: err.error_code().to_string(),
            message,
            details: err
                .is_retryable()
                .then(|| serde_json::json!({ "retryable": true })),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
