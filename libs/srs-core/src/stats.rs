//! Deck-wide statistics for comparing the two algorithms.

use serde::{Deserialize, Serialize};

use crate::types::{Algorithm, Card};

/// Percentage of correct reviews; 0 when there are none.
pub fn accuracy(correct: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

/// Arithmetic mean; 0 for an empty input.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Review totals for one algorithm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewTotals {
    pub total_reviews: u64,
    pub correct_reviews: u64,
    pub accuracy: f64,
}

impl ReviewTotals {
    fn collect(cards: &[Card], algorithm: Algorithm) -> Self {
        let (total, correct) = cards.iter().fold((0u64, 0u64), |(t, c), card| {
            let (total, correct) = card.review_counts(algorithm);
            (t + u64::from(total), c + u64::from(correct))
        });
        Self {
            total_reviews: total,
            correct_reviews: correct,
            accuracy: accuracy(correct, total),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sm2Statistics {
    #[serde(flatten)]
    pub totals: ReviewTotals,
    pub average_interval: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FsrsStatistics {
    #[serde(flatten)]
    pub totals: ReviewTotals,
    pub average_stability: f64,
}

/// Side-by-side statistics for both algorithms over a deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub sm2: Sm2Statistics,
    pub fsrs: FsrsStatistics,
}

impl Statistics {
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            sm2: Sm2Statistics {
                totals: ReviewTotals::collect(cards, Algorithm::Sm2),
                average_interval: mean(cards.iter().map(|c| f64::from(c.sm2.interval))),
            },
            fsrs: FsrsStatistics {
                totals: ReviewTotals::collect(cards, Algorithm::Fsrs),
                average_stability: mean(cards.iter().map(|c| c.fsrs.stability)),
            },
        }
    }

    pub fn totals(&self, algorithm: Algorithm) -> &ReviewTotals {
        match algorithm {
            Algorithm::Sm2 => &self.sm2.totals,
            Algorithm::Fsrs => &self.fsrs.totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn accuracy_zero_guard() {
        assert_eq!(accuracy(0, 0), 0.0);
    }

    #[test]
    fn accuracy_percentage() {
        for (correct, total) in [(0u64, 1u64), (1, 1), (3, 4), (7, 9), (50, 200)] {
            let expected = 100.0 * correct as f64 / total as f64;
            assert!((accuracy(correct, total) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(std::iter::empty::<f64>()), 0.0);
        assert_eq!(mean([2.0, 4.0]), 3.0);
    }

    #[test]
    fn empty_deck_statistics() {
        assert_eq!(Statistics::from_cards(&[]), Statistics::default());
    }

    #[test]
    fn deck_statistics() {
        let now = Utc::now();
        let mut a = Card::new(1, "q1", "a1", now);
        a.sm2.interval = 6;
        a.sm2.total_reviews = 4;
        a.sm2.correct_reviews = 3;
        a.fsrs.stability = 3.0;
        a.fsrs.total_reviews = 2;
        a.fsrs.correct_reviews = 2;

        let mut b = Card::new(2, "q2", "a2", now);
        b.sm2.interval = 1;
        b.sm2.total_reviews = 1;
        b.fsrs.stability = 5.0;

        let stats = Statistics::from_cards(&[a, b]);

        assert_eq!(
            stats.sm2,
            Sm2Statistics {
                totals: ReviewTotals {
                    total_reviews: 5,
                    correct_reviews: 3,
                    accuracy: 60.0,
                },
                average_interval: 3.5,
            }
        );
        assert_eq!(stats.fsrs.totals.accuracy, 100.0);
        assert_eq!(stats.fsrs.average_stability, 4.0);
        assert_eq!(stats.totals(Algorithm::Sm2).total_reviews, 5);
    }

    #[test]
    fn serializes_flat_per_algorithm() {
        let json = serde_json::to_value(Statistics::default()).unwrap();
        assert_eq!(json["sm2"]["accuracy"].as_f64(), Some(0.0));
        assert_eq!(json["sm2"]["average_interval"].as_f64(), Some(0.0));
        assert_eq!(json["fsrs"]["total_reviews"].as_u64(), Some(0));
        assert_eq!(json["fsrs"]["average_stability"].as_f64(), Some(0.0));
    }
}
