//! SM-2 spaced repetition algorithm.
//!
//! Classic SuperMemo 2 on a 4-point rating scale, with an interval ceiling
//! and an ease penalty on failed reviews.

use super::{add_days, SpacedRepetitionAlgorithm};
use crate::error::{Result, SchedulingError};
use crate::types::{Algorithm, Rating, Sm2State, MAX_EASE_FACTOR, MIN_EASE_FACTOR};
use chrono::{DateTime, Utc};

/// Interval ceiling in days.
pub const DEFAULT_MAX_INTERVAL: u32 = 365;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub max_interval: u32,
    pub minimum_ease: f64,
    pub maximum_ease: f64,
    /// Subtracted from the ease factor when a review fails.
    pub lapse_penalty: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            max_interval: DEFAULT_MAX_INTERVAL,
            minimum_ease: MIN_EASE_FACTOR,
            maximum_ease: MAX_EASE_FACTOR,
            lapse_penalty: 0.2,
        }
    }
}

/// Raw result of one SM-2 step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sm2Outcome {
    pub interval: u32,
    pub repetitions: u32,
    pub ease_factor: f64,
}

impl Sm2 {
    pub fn with_max_interval(max_interval: u32) -> Self {
        Self {
            max_interval,
            ..Self::default()
        }
    }

    /// Run one SM-2 step for a raw 1-4 quality value.
    pub fn calculate(&self, state: &Sm2State, quality: u8) -> Result<Sm2Outcome> {
        let rating = Rating::from_value(quality)?;
        self.step(state, rating)
    }

    fn step(&self, state: &Sm2State, rating: Rating) -> Result<Sm2Outcome> {
        if !state.ease_factor.is_finite() {
            return Err(SchedulingError::InvalidState(format!(
                "ease factor {} is not a finite number",
                state.ease_factor
            )));
        }

        if rating.is_correct() {
            let interval = match state.repetitions {
                0 => 1,
                1 => 6,
                // A pass never shrinks the interval below a day, even from a
                // hand-edited zero.
                _ => (state.interval as f64 * state.ease_factor)
                    .round()
                    .max(1.0)
                    .min(self.max_interval as f64) as u32,
            };

            // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
            let q = 5.0 - f64::from(rating.to_value());
            let ease_factor = (state.ease_factor + (0.1 - q * (0.08 + q * 0.02)))
                .max(self.minimum_ease)
                .min(self.maximum_ease);

            Ok(Sm2Outcome {
                interval: interval.min(self.max_interval),
                repetitions: state.repetitions.saturating_add(1),
                ease_factor,
            })
        } else {
            Ok(Sm2Outcome {
                interval: 1,
                repetitions: 0,
                ease_factor: (state.ease_factor - self.lapse_penalty)
                    .max(self.minimum_ease)
                    .min(self.maximum_ease),
            })
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    type State = Sm2State;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Sm2
    }

    fn initial_state(&self, now: DateTime<Utc>) -> Sm2State {
        Sm2State::new(now)
    }

    fn schedule(&self, state: &Sm2State, rating: Rating, now: DateTime<Utc>) -> Result<Sm2State> {
        let outcome = self.step(state, rating)?;
        let next_review = add_days(now, outcome.interval)?;

        Ok(Sm2State {
            interval: outcome.interval,
            repetitions: outcome.repetitions,
            ease_factor: outcome.ease_factor,
            next_review,
            total_reviews: state.total_reviews.saturating_add(1),
            correct_reviews: state
                .correct_reviews
                .saturating_add(u32::from(rating.is_correct())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn state(interval: u32, repetitions: u32, ease_factor: f64) -> Sm2State {
        Sm2State {
            interval,
            repetitions,
            ease_factor,
            ..Sm2State::new(now())
        }
    }

    #[test]
    fn first_pass_gives_one_day() {
        let sm2 = Sm2::default();
        for quality in [3, 4] {
            let outcome = sm2.calculate(&state(0, 0, 2.5), quality).unwrap();
            assert_eq!(outcome.interval, 1);
            assert_eq!(outcome.repetitions, 1);
        }
    }

    #[test]
    fn second_pass_gives_six_days() {
        let sm2 = Sm2::default();
        for quality in [3, 4] {
            let outcome = sm2.calculate(&state(1, 1, 2.5), quality).unwrap();
            assert_eq!(outcome.interval, 6);
            assert_eq!(outcome.repetitions, 2);
        }
    }

    #[test]
    fn failure_resets_regardless_of_prior_state() {
        let sm2 = Sm2::default();
        for prior in [state(0, 0, 2.5), state(6, 2, 2.1), state(200, 9, 1.3)] {
            for quality in [1, 2] {
                let outcome = sm2.calculate(&prior, quality).unwrap();
                assert_eq!(outcome.interval, 1);
                assert_eq!(outcome.repetitions, 0);
            }
        }
    }

    #[test]
    fn failure_lowers_ease_down_to_floor() {
        let sm2 = Sm2::default();
        let outcome = sm2.calculate(&state(10, 3, 2.5), 1).unwrap();
        assert!((outcome.ease_factor - 2.3).abs() < 1e-9);

        let outcome = sm2.calculate(&state(10, 3, 1.4), 2).unwrap();
        assert_eq!(outcome.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn ease_stays_within_bounds() {
        let sm2 = Sm2::default();
        for ease in [1.3, 1.5, 2.0, 2.36, 2.5] {
            for reps in [0, 1, 4] {
                for quality in 1..=4 {
                    let outcome = sm2.calculate(&state(12, reps, ease), quality).unwrap();
                    assert!(outcome.ease_factor >= MIN_EASE_FACTOR);
                    assert!(outcome.ease_factor <= MAX_EASE_FACTOR);
                }
            }
        }
    }

    #[test]
    fn good_rating_lowers_ease_by_point_one_four() {
        let sm2 = Sm2::default();
        let outcome = sm2.calculate(&state(6, 2, 2.5), 3).unwrap();
        assert!((outcome.ease_factor - 2.36).abs() < 1e-9);
    }

    #[test]
    fn interval_capped_at_ceiling() {
        let sm2 = Sm2::default();
        let outcome = sm2.calculate(&state(300, 5, 2.5), 4).unwrap();
        assert_eq!(outcome.interval, DEFAULT_MAX_INTERVAL);

        let sm2 = Sm2::with_max_interval(30);
        let outcome = sm2.calculate(&state(20, 5, 2.5), 4).unwrap();
        assert_eq!(outcome.interval, 30);
    }

    #[test]
    fn rejects_invalid_quality() {
        let sm2 = Sm2::default();
        assert_eq!(
            sm2.calculate(&state(0, 0, 2.5), 0),
            Err(SchedulingError::InvalidRating(0))
        );
        assert_eq!(
            sm2.calculate(&state(0, 0, 2.5), 5),
            Err(SchedulingError::InvalidRating(5))
        );
    }

    #[test]
    fn rejects_non_finite_ease() {
        let sm2 = Sm2::default();
        let result = sm2.calculate(&state(6, 2, f64::NAN), 3);
        assert!(matches!(result, Err(SchedulingError::InvalidState(_))));
    }

    #[test]
    fn new_card_sequence_four_four_three() {
        let sm2 = Sm2::default();
        let mut current = sm2.initial_state(now());
        let mut intervals = Vec::new();

        for rating in [Rating::Easy, Rating::Easy, Rating::Good] {
            let expected_ease = current.ease_factor;
            current = sm2.schedule(&current, rating, now()).unwrap();
            intervals.push(current.interval);
            if intervals.len() == 3 {
                assert_eq!(current.interval, (6.0 * expected_ease).round() as u32);
            }
        }

        assert_eq!(intervals, vec![1, 6, 15]);
        assert!((current.ease_factor - 2.36).abs() < 1e-9);
    }

    #[test]
    fn schedule_sets_next_review_and_counters() {
        let sm2 = Sm2::default();
        let reviewed_at = now();
        let initial = sm2.initial_state(reviewed_at);

        let passed = sm2.schedule(&initial, Rating::Good, reviewed_at).unwrap();
        assert_eq!(passed.next_review, reviewed_at + Duration::days(1));
        assert_eq!(passed.total_reviews, 1);
        assert_eq!(passed.correct_reviews, 1);

        let failed = sm2.schedule(&passed, Rating::Hard, reviewed_at).unwrap();
        assert_eq!(failed.total_reviews, 2);
        assert_eq!(failed.correct_reviews, 1);
        assert!(failed.correct_reviews <= failed.total_reviews);
    }

    #[test]
    fn correct_count_saturates_with_total() {
        let sm2 = Sm2::default();
        let current = Sm2State {
            total_reviews: u32::MAX,
            correct_reviews: u32::MAX,
            ..state(6, 2, 2.5)
        };

        let next = sm2.schedule(&current, Rating::Good, now()).unwrap();
        assert_eq!(next.total_reviews, u32::MAX);
        assert_eq!(next.correct_reviews, u32::MAX);
    }
}
