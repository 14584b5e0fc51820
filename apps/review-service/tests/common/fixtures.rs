//! Test fixtures and factory functions for creating test data.

use srs_review_service::models::{Algorithm, ReviewRequest};

pub const SESSION: &str = "test-session";

/// Create a review request with a fixed session and a 2.5s duration.
pub fn review_request(card_id: i64, algorithm: Algorithm, rating: u8) -> ReviewRequest {
    ReviewRequest {
        session_id: SESSION.to_string(),
        card_id,
        algorithm,
        rating,
        review_time_secs: Some(2.5),
    }
}

/// Same as [`review_request`] but for another session.
pub fn review_request_in(
    session_id: &str,
    card_id: i64,
    algorithm: Algorithm,
    rating: u8,
) -> ReviewRequest {
    ReviewRequest {
        session_id: session_id.to_string(),
        ..review_request(card_id, algorithm, rating)
    }
}
