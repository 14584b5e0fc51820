//! Error types for srs-core.

use thiserror::Error;

/// Result type alias using SchedulingError.
pub type Result<T> = std::result::Result<T, SchedulingError>;

/// Errors that can occur while scheduling a review.
///
/// Both variants are raised before any state is computed, so a caller that
/// receives one can drop the review without having touched the card.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulingError {
    #[error("invalid rating {0}: expected a value between 1 and 4")]
    InvalidRating(u8),

    #[error("invalid scheduling state: {0}")]
    InvalidState(String),
}
