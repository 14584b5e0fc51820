//! Due-card selection for building a review queue.

use chrono::{DateTime, Utc};

use crate::types::{Algorithm, HasReviewDates};

/// Cards picked for a review session under one algorithm.
#[derive(Debug, Clone)]
pub struct DueSelection<'a, T> {
    pub cards: Vec<&'a T>,
    /// How many cards were actually due; zero means `cards` is the full deck.
    pub due_count: usize,
}

impl<'a, T: HasReviewDates> DueSelection<'a, T> {
    /// Cards whose next review for `algorithm` is at or before `now`, in
    /// input order. When nothing is due the whole deck is returned so a
    /// learner always has something to study.
    pub fn select(cards: &'a [T], algorithm: Algorithm, now: DateTime<Utc>) -> Self {
        let due: Vec<&T> = cards
            .iter()
            .filter(|card| card.next_review(algorithm) <= now)
            .collect();
        let due_count = due.len();

        if due.is_empty() {
            Self {
                cards: cards.iter().collect(),
                due_count,
            }
        } else {
            Self {
                cards: due,
                due_count,
            }
        }
    }

    /// True when the selection fell back to the full deck.
    pub fn is_fallback(&self) -> bool {
        self.due_count == 0
    }
}

/// Select the review queue for `algorithm`; see [`DueSelection::select`].
pub fn select_due<T: HasReviewDates>(cards: &[T], algorithm: Algorithm, now: DateTime<Utc>) -> Vec<&T> {
    DueSelection::select(cards, algorithm, now).cards
}
