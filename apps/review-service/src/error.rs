//! Error handling for the review service

use srs_core::SchedulingError;
use thiserror::Error;

/// Service error types
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    /// Stable machine-readable kind, used in logs and by callers that
    /// translate errors for a client.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Scheduling(SchedulingError::InvalidRating(_)) => "invalid_rating",
            ServiceError::Scheduling(SchedulingError::InvalidState(_)) => "invalid_state",
            ServiceError::Config(_) => "config_error",
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;
