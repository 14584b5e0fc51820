//! Reductions over the review-event log: per-session algorithm performance
//! and per-day comparisons.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::stats::{accuracy, mean};
use crate::types::{Algorithm, ReviewEvent};

/// How one algorithm performed within one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmPerformance {
    pub session_id: String,
    pub algorithm: Algorithm,
    pub review_count: u64,
    /// Share of reviews rated 3 or 4, as a percentage.
    pub retention_rate: f64,
    /// Mean over reviews that reported a duration; 0 if none did.
    pub average_review_time_secs: f64,
    /// Mean post-review interval (SM-2) or stability (FSRS).
    pub average_new_value: f64,
}

/// One UTC day of reviews across all sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAnalytics {
    pub date: NaiveDate,
    pub total_reviews: u64,
    pub unique_sessions: u64,
    /// None when the algorithm saw no reviews that day.
    pub avg_retention_sm2: Option<f64>,
    pub avg_retention_fsrs: Option<f64>,
}

fn retention(events: &[&ReviewEvent]) -> f64 {
    let correct = events.iter().filter(|e| e.rating.is_correct()).count();
    accuracy(correct as u64, events.len() as u64)
}

/// Group events by (session, algorithm), ordered by session then algorithm.
pub fn algorithm_performance(events: &[ReviewEvent]) -> Vec<AlgorithmPerformance> {
    let mut groups: BTreeMap<(&str, Algorithm), Vec<&ReviewEvent>> = BTreeMap::new();
    for event in events {
        groups
            .entry((event.session_id.as_str(), event.algorithm))
            .or_default()
            .push(event);
    }

    groups
        .into_iter()
        .map(|((session_id, algorithm), group)| AlgorithmPerformance {
            session_id: session_id.to_string(),
            algorithm,
            review_count: group.len() as u64,
            retention_rate: retention(&group),
            average_review_time_secs: mean(group.iter().filter_map(|e| e.review_time_secs)),
            average_new_value: mean(group.iter().map(|e| e.new_value)),
        })
        .collect()
}

/// Per-day totals, oldest day first.
pub fn daily_analytics(events: &[ReviewEvent]) -> Vec<DailyAnalytics> {
    let mut days: BTreeMap<NaiveDate, Vec<&ReviewEvent>> = BTreeMap::new();
    for event in events {
        days.entry(event.reviewed_at.date_naive())
            .or_default()
            .push(event);
    }

    days.into_iter()
        .map(|(date, day)| {
            let sessions: BTreeSet<&str> = day.iter().map(|e| e.session_id.as_str()).collect();
            let by_algorithm = |algorithm: Algorithm| {
                let subset: Vec<&ReviewEvent> = day
                    .iter()
                    .copied()
                    .filter(|e| e.algorithm == algorithm)
                    .collect();
                (!subset.is_empty()).then(|| retention(&subset))
            };

            DailyAnalytics {
                date,
                total_reviews: day.len() as u64,
                unique_sessions: sessions.len() as u64,
                avg_retention_sm2: by_algorithm(Algorithm::Sm2),
                avg_retention_fsrs: by_algorithm(Algorithm::Fsrs),
            }
        })
        .collect()
}
