//! Request, response and log record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from srs-core
pub use srs_core::types::{Algorithm, Card, FsrsState, Rating, ReviewEvent, Sm2State};

/// Request to add a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCard {
    pub front: String,
    pub back: String,
}

/// Request to record one review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub session_id: String,
    pub card_id: i64,
    pub algorithm: Algorithm,
    /// Raw 1-4 rating as sent by the client; validated by the service.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_time_secs: Option<f64>,
}

/// Result of a recorded review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub card_id: i64,
    pub algorithm: Algorithm,
    pub previous_value: f64,
    pub new_value: f64,
    pub next_review: DateTime<Utc>,
}

/// Card text without scheduling state, as shown in a queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: i64,
    pub front: String,
    pub back: String,
}

impl From<&Card> for CardSummary {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            front: card.front.clone(),
            back: card.back.clone(),
        }
    }
}

/// Review queue for one algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueQueue {
    pub algorithm: Algorithm,
    /// Cards actually due; zero when `cards` is the whole deck.
    pub due_count: usize,
    pub cards: Vec<CardSummary>,
}

impl DueQueue {
    pub fn is_fallback(&self) -> bool {
        self.due_count == 0
    }
}

/// Kind of user action kept in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    CardReview,
    ResetProgress,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CardReview => "card_review",
            Self::ResetProgress => "reset_progress",
        }
    }
}

/// One entry of the append-only activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub session_id: String,
    pub action: ActivityKind,
    pub timestamp: DateTime<Utc>,
}
