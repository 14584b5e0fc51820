//! Spaced repetition algorithm implementations.

pub mod fsrs;
pub mod sm2;

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, SchedulingError};
use crate::types::{Algorithm, Card, Rating, StateUpdate};

pub use fsrs::{Fsrs, FsrsOutcome};
pub use sm2::{Sm2, Sm2Outcome};

/// Trait for spaced repetition algorithms.
///
/// Implementations are pure: `schedule` never touches anything but its
/// arguments, so one instance can be shared across threads and cards.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Per-card state this algorithm reads and produces.
    type State;

    /// Algorithm identifier.
    fn algorithm(&self) -> Algorithm;

    /// Initial state for a card created at `now`.
    fn initial_state(&self, now: DateTime<Utc>) -> Self::State;

    /// Calculate next review state after a review.
    fn schedule(&self, state: &Self::State, rating: Rating, now: DateTime<Utc>)
        -> Result<Self::State>;
}

/// Both algorithms behind one entry point, dispatched by [`Algorithm`].
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pub sm2: Sm2,
    pub fsrs: Fsrs,
}

impl Scheduler {
    pub fn new(sm2: Sm2, fsrs: Fsrs) -> Self {
        Self { sm2, fsrs }
    }

    /// Compute the new state of `card` for one algorithm.
    ///
    /// The card itself is left alone; callers persist the returned update
    /// with [`Card::apply`] once they are ready to commit it.
    pub fn schedule(
        &self,
        card: &Card,
        algorithm: Algorithm,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<StateUpdate> {
        match algorithm {
            Algorithm::Sm2 => self.sm2.schedule(&card.sm2, rating, now).map(StateUpdate::Sm2),
            Algorithm::Fsrs => self.fsrs.schedule(&card.fsrs, rating, now).map(StateUpdate::Fsrs),
        }
    }
}

/// `now` plus a whole number of days, or `InvalidState` if the date overflows.
pub(crate) fn add_days(now: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    now.checked_add_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| {
            SchedulingError::InvalidState(format!("next review {days} days out is not representable"))
        })
}
