//! FSRS (Free Spaced Repetition Scheduler) algorithm.
//!
//! DSR model over a fixed weight table:
//! - Difficulty (D): card difficulty 1-10
//! - Stability (S): days until retention drops to target
//! - Retrievability (R): probability of recall after `t` days

use super::{add_days, SpacedRepetitionAlgorithm};
use crate::error::{Result, SchedulingError};
use crate::types::{
    Algorithm, FsrsState, Rating, MAX_DIFFICULTY, MIN_DIFFICULTY, MIN_STABILITY,
};
use chrono::{DateTime, Utc};

/// Forgetting-curve scale, chosen so that R(S, S) = 0.9.
pub const FACTOR: f64 = 19.0 / 81.0;
/// Forgetting-curve exponent.
pub const DECAY: f64 = -0.5;

/// FSRS weights. Only the first seven feed the update; the rest are kept so
/// the table stays identical to the published parameter set.
pub const WEIGHTS: [f64; 19] = [
    0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192, 1.01925,
    1.9395, 0.11, 0.29605, 2.2698, 0.2315, 2.9898, 0.51655, 0.6621,
];

/// Difficulty change per rating step away from Good.
pub const W_DIFFICULTY_STEP: usize = 0;
/// Exponent of the base stability growth.
pub const W_GROWTH_EXP: usize = 1;
/// Stability saturation: larger S grows more slowly.
pub const W_STABILITY_DECAY: usize = 2;
/// How strongly a low retrievability boosts growth.
pub const W_RETRIEVABILITY_GAIN: usize = 3;
/// Overall growth scale.
pub const W_GROWTH_SCALE: usize = 4;
/// Divides growth on a Hard rating.
pub const W_HARD_PENALTY: usize = 5;
/// Multiplies growth on an Easy rating.
pub const W_EASY_BONUS: usize = 6;

/// FSRS scheduler. Stateless; the weights are [`WEIGHTS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Fsrs;

/// Raw result of one FSRS step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsrsOutcome {
    pub difficulty: f64,
    pub stability: f64,
    pub interval_days: u32,
}

/// R = (1 + FACTOR * t / S)^DECAY
pub fn retrievability(elapsed_days: f64, stability: f64) -> f64 {
    (1.0 + FACTOR * elapsed_days / stability).powf(DECAY)
}

/// Whole days between two instants, truncated toward zero.
///
/// Reviews that land out of order within the same day truncate to zero. Only
/// a span of at least one whole day backwards is an error.
pub fn elapsed_days(last_review: DateTime<Utc>, now: DateTime<Utc>) -> Result<i64> {
    let days = now.signed_duration_since(last_review).num_days();
    if days < 0 {
        return Err(SchedulingError::InvalidState(format!(
            "review time {now} precedes last review {last_review}"
        )));
    }
    Ok(days)
}

impl Fsrs {
    /// D' = clamp(D + w0 * (3 - G), 1, 10)
    pub fn next_difficulty(&self, difficulty: f64, rating: Rating) -> f64 {
        let step = 3.0 - f64::from(rating.to_value());
        (difficulty + WEIGHTS[W_DIFFICULTY_STEP] * step).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
    }

    /// S' = S * (1 + e^w1 * (11 - D) * S^-w2 * (e^((1-R) * w3) - 1) * w4 / (1 + w5*hard) * (1 + w6*easy))
    ///
    /// `difficulty` is the value before this review's update.
    pub fn next_stability(
        &self,
        stability: f64,
        difficulty: f64,
        retrievability: f64,
        rating: Rating,
    ) -> f64 {
        let hard = if rating == Rating::Hard { 1.0 } else { 0.0 };
        let easy = if rating == Rating::Easy { 1.0 } else { 0.0 };

        let growth = WEIGHTS[W_GROWTH_EXP].exp()
            * (11.0 - difficulty)
            * stability.powf(-WEIGHTS[W_STABILITY_DECAY])
            * (((1.0 - retrievability) * WEIGHTS[W_RETRIEVABILITY_GAIN]).exp() - 1.0)
            * WEIGHTS[W_GROWTH_SCALE]
            / (1.0 + WEIGHTS[W_HARD_PENALTY] * hard)
            * (1.0 + WEIGHTS[W_EASY_BONUS] * easy);

        (stability * (1.0 + growth)).max(MIN_STABILITY)
    }

    /// I = floor(S * 9 / FACTOR)
    pub fn next_interval(&self, stability: f64) -> u32 {
        // `as` saturates, so a runaway stability pins at u32::MAX and is
        // rejected later when the due date is computed.
        (stability * 9.0 / FACTOR).floor() as u32
    }

    /// Run one FSRS step for a raw 1-4 rating value.
    pub fn calculate(
        &self,
        difficulty: f64,
        stability: f64,
        last_review: DateTime<Utc>,
        now: DateTime<Utc>,
        rating: u8,
    ) -> Result<FsrsOutcome> {
        let rating = Rating::from_value(rating)?;
        self.step(difficulty, stability, last_review, now, rating)
    }

    fn step(
        &self,
        difficulty: f64,
        stability: f64,
        last_review: DateTime<Utc>,
        now: DateTime<Utc>,
        rating: Rating,
    ) -> Result<FsrsOutcome> {
        if !(stability.is_finite() && stability > 0.0) {
            return Err(SchedulingError::InvalidState(format!(
                "stability must be positive, got {stability}"
            )));
        }
        if !difficulty.is_finite() {
            return Err(SchedulingError::InvalidState(format!(
                "difficulty {difficulty} is not a finite number"
            )));
        }

        let elapsed = elapsed_days(last_review, now)?;
        let r = retrievability(elapsed as f64, stability);

        let new_difficulty = self.next_difficulty(difficulty, rating);
        let new_stability = self.next_stability(stability, difficulty, r, rating);

        Ok(FsrsOutcome {
            difficulty: new_difficulty,
            stability: new_stability,
            interval_days: self.next_interval(new_stability),
        })
    }
}

impl SpacedRepetitionAlgorithm for Fsrs {
    type State = FsrsState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Fsrs
    }

    fn initial_state(&self, now: DateTime<Utc>) -> FsrsState {
        FsrsState::new(now)
    }

    fn schedule(&self, state: &FsrsState, rating: Rating, now: DateTime<Utc>) -> Result<FsrsState> {
        let outcome = self.step(state.difficulty, state.stability, state.last_review, now, rating)?;
        let next_review = add_days(now, outcome.interval_days)?;

        Ok(FsrsState {
            difficulty: outcome.difficulty,
            stability: outcome.stability,
            last_review: now.max(state.last_review),
            next_review,
            total_reviews: state.total_reviews.saturating_add(1),
            correct_reviews: state
                .correct_reviews
                .saturating_add(u32::from(rating.is_correct())),
        })
    }
}
