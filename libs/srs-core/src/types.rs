//! Core types for the scheduling engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

/// Lowest ease factor SM-2 will ever store.
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Highest ease factor SM-2 will ever store; also the starting ease.
pub const MAX_EASE_FACTOR: f64 = 2.5;
/// Difficulty bounds for FSRS.
pub const MIN_DIFFICULTY: f64 = 1.0;
pub const MAX_DIFFICULTY: f64 = 10.0;
/// Stability floor for FSRS.
pub const MIN_STABILITY: f64 = 0.1;

/// Starting FSRS difficulty for a new card.
pub const INITIAL_DIFFICULTY: f64 = 5.0;
/// Starting FSRS stability for a new card.
pub const INITIAL_STABILITY: f64 = 2.0;

/// Rating for a review, shared by both algorithms.
///
/// Serialized as its numeric value (1-4) since that is what clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value, rejecting anything outside 1-4.
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            4 => Ok(Self::Easy),
            other => Err(SchedulingError::InvalidRating(other)),
        }
    }

    /// Ratings of 3 and 4 count as a successful recall.
    pub fn is_correct(self) -> bool {
        self.to_value() >= 3
    }
}

impl TryFrom<u8> for Rating {
    type Error = SchedulingError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.to_value()
    }
}

/// Algorithm options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Sm2,
    Fsrs,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Sm2
    }
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Sm2, Algorithm::Fsrs];

    /// Get the algorithm name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm2 => "sm2",
            Self::Fsrs => "fsrs",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sm2" => Some(Self::Sm2),
            "fsrs" => Some(Self::Fsrs),
            _ => None,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SM-2 scheduling state of one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sm2State {
    pub interval: u32,
    pub repetitions: u32,
    pub ease_factor: f64,
    pub next_review: DateTime<Utc>,
    pub total_reviews: u32,
    pub correct_reviews: u32,
}

impl Sm2State {
    /// Defaults for a card created at `now`; it is due immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            interval: 0,
            repetitions: 0,
            ease_factor: MAX_EASE_FACTOR,
            next_review: now,
            total_reviews: 0,
            correct_reviews: 0,
        }
    }
}

/// FSRS scheduling state of one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsrsState {
    pub difficulty: f64,
    pub stability: f64,
    /// Previous FSRS review, or card creation before the first one.
    pub last_review: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
    pub total_reviews: u32,
    pub correct_reviews: u32,
}

impl FsrsState {
    /// Defaults for a card created at `now`; it is due immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            difficulty: INITIAL_DIFFICULTY,
            stability: INITIAL_STABILITY,
            last_review: now,
            next_review: now,
            total_reviews: 0,
            correct_reviews: 0,
        }
    }
}

/// Anything that carries one next-review timestamp per algorithm.
pub trait HasReviewDates {
    fn next_review(&self, algorithm: Algorithm) -> DateTime<Utc>;
}

/// A flashcard with its two independent scheduling states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub front: String,
    pub back: String,
    pub created_at: DateTime<Utc>,
    pub sm2: Sm2State,
    pub fsrs: FsrsState,
}

impl Card {
    pub fn new(id: i64, front: impl Into<String>, back: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            created_at: now,
            sm2: Sm2State::new(now),
            fsrs: FsrsState::new(now),
        }
    }

    /// Restore both scheduling states to their creation defaults.
    pub fn reset_progress(&mut self) {
        self.sm2 = Sm2State::new(self.created_at);
        self.fsrs = FsrsState::new(self.created_at);
    }

    /// Replace exactly one of the two scheduling states.
    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::Sm2(state) => self.sm2 = state,
            StateUpdate::Fsrs(state) => self.fsrs = state,
        }
    }

    /// The value each algorithm reports in review telemetry:
    /// SM-2 interval in days, FSRS stability.
    pub fn tracked_value(&self, algorithm: Algorithm) -> f64 {
        match algorithm {
            Algorithm::Sm2 => self.sm2.interval as f64,
            Algorithm::Fsrs => self.fsrs.stability,
        }
    }

    /// Review counters (total, correct) for one algorithm.
    pub fn review_counts(&self, algorithm: Algorithm) -> (u32, u32) {
        match algorithm {
            Algorithm::Sm2 => (self.sm2.total_reviews, self.sm2.correct_reviews),
            Algorithm::Fsrs => (self.fsrs.total_reviews, self.fsrs.correct_reviews),
        }
    }
}

impl HasReviewDates for Card {
    fn next_review(&self, algorithm: Algorithm) -> DateTime<Utc> {
        match algorithm {
            Algorithm::Sm2 => self.sm2.next_review,
            Algorithm::Fsrs => self.fsrs.next_review,
        }
    }
}

impl<T: HasReviewDates> HasReviewDates for &T {
    fn next_review(&self, algorithm: Algorithm) -> DateTime<Utc> {
        (**self).next_review(algorithm)
    }
}

/// New state for exactly one algorithm, produced by a scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    Sm2(Sm2State),
    Fsrs(FsrsState),
}

impl StateUpdate {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Sm2(_) => Algorithm::Sm2,
            Self::Fsrs(_) => Algorithm::Fsrs,
        }
    }

    pub fn next_review(&self) -> DateTime<Utc> {
        match self {
            Self::Sm2(state) => state.next_review,
            Self::Fsrs(state) => state.next_review,
        }
    }
}

/// Immutable record of one review, appended after the card is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub session_id: String,
    pub card_id: i64,
    pub algorithm: Algorithm,
    pub rating: Rating,
    /// SM-2 interval or FSRS stability before the review.
    pub previous_value: f64,
    /// SM-2 interval or FSRS stability after the review.
    pub new_value: f64,
    /// Client-reported time spent on the card, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_time_secs: Option<f64>,
    pub reviewed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn rating_round_trips_through_value() {
        for value in 1..=4u8 {
            let rating = Rating::from_value(value).unwrap();
            assert_eq!(rating.to_value(), value);
        }
    }

    #[test]
    fn rating_rejects_out_of_range() {
        assert_eq!(Rating::from_value(0), Err(SchedulingError::InvalidRating(0)));
        assert_eq!(Rating::from_value(5), Err(SchedulingError::InvalidRating(5)));
    }

    #[test]
    fn rating_correctness_threshold() {
        assert!(!Rating::Again.is_correct());
        assert!(!Rating::Hard.is_correct());
        assert!(Rating::Good.is_correct());
        assert!(Rating::Easy.is_correct());
    }

    #[test]
    fn rating_deserializes_from_number() {
        let rating: Rating = serde_json::from_str("3").unwrap();
        assert_eq!(rating, Rating::Good);
        assert!(serde_json::from_str::<Rating>("9").is_err());
        assert_eq!(serde_json::to_string(&Rating::Easy).unwrap(), "4");
    }

    #[test]
    fn algorithm_parse() {
        assert_eq!(Algorithm::from_str("sm2"), Some(Algorithm::Sm2));
        assert_eq!(Algorithm::from_str("FSRS"), Some(Algorithm::Fsrs));
        assert_eq!(Algorithm::from_str("leitner"), None);
        assert_eq!(Algorithm::Fsrs.to_string(), "fsrs");
    }

    #[test]
    fn new_card_has_default_states() {
        let now = Utc::now();
        let card = Card::new(1, "ephemeral", "lasting for a very short time", now);

        assert_eq!(card.sm2.interval, 0);
        assert_eq!(card.sm2.repetitions, 0);
        assert_eq!(card.sm2.ease_factor, 2.5);
        assert_eq!(card.fsrs.difficulty, 5.0);
        assert_eq!(card.fsrs.stability, 2.0);
        assert_eq!(card.next_review(Algorithm::Sm2), now);
        assert_eq!(card.next_review(Algorithm::Fsrs), now);
    }

    #[test]
    fn apply_touches_only_one_algorithm() {
        let now = Utc::now();
        let mut card = Card::new(1, "q", "a", now);
        let fsrs_before = card.fsrs.clone();

        let mut sm2 = card.sm2.clone();
        sm2.interval = 6;
        sm2.next_review = now + Duration::days(6);
        card.apply(StateUpdate::Sm2(sm2));

        assert_eq!(card.sm2.interval, 6);
        assert_eq!(card.fsrs, fsrs_before);
    }

    #[test]
    fn reset_progress_restores_defaults() {
        let created = Utc::now() - Duration::days(10);
        let mut card = Card::new(1, "q", "a", created);
        card.sm2.interval = 15;
        card.sm2.total_reviews = 3;
        card.fsrs.stability = 40.0;

        card.reset_progress();

        assert_eq!(card.sm2, Sm2State::new(created));
        assert_eq!(card.fsrs, FsrsState::new(created));
    }

    #[test]
    fn tracked_value_per_algorithm() {
        let mut card = Card::new(1, "q", "a", Utc::now());
        card.sm2.interval = 6;
        card.fsrs.stability = 3.5;
        assert_eq!(card.tracked_value(Algorithm::Sm2), 6.0);
        assert_eq!(card.tracked_value(Algorithm::Fsrs), 3.5);
    }
}
