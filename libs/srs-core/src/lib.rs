//! Scheduling engine for comparing two spaced repetition algorithms.
//!
//! Provides:
//! - SM-2 and FSRS schedulers behind one [`Scheduler`] dispatch
//! - Due-card selection with a fallback to the full deck
//! - Deck statistics and review-log analytics
//! - Shared types (Card, Rating, Algorithm, ReviewEvent, etc.)

pub mod algorithm;
pub mod analytics;
pub mod due;
pub mod error;
pub mod stats;
pub mod types;

pub use algorithm::{Fsrs, FsrsOutcome, Scheduler, Sm2, Sm2Outcome, SpacedRepetitionAlgorithm};
pub use analytics::{algorithm_performance, daily_analytics, AlgorithmPerformance, DailyAnalytics};
pub use due::{select_due, DueSelection};
pub use error::{Result, SchedulingError};
pub use stats::{accuracy, Statistics};
pub use types::{
    Algorithm, Card, FsrsState, HasReviewDates, Rating, ReviewEvent, Sm2State, StateUpdate,
};
