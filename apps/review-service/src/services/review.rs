//! Review service: the only writer of card scheduling state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use srs_core::{
    algorithm_performance, daily_analytics, AlgorithmPerformance, DailyAnalytics, DueSelection,
    Scheduler, Statistics,
};
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::error::{Result, ServiceError};
use crate::models::*;

/// Coordinates the schedulers with the card store.
#[derive(Clone)]
pub struct ReviewService {
    db: Arc<Database>,
    scheduler: Arc<Scheduler>,
}

impl ReviewService {
    pub fn new(db: Arc<Database>, scheduler: Scheduler) -> Self {
        Self {
            db,
            scheduler: Arc::new(scheduler),
        }
    }

    pub fn db(&self) -> &Arc<Database> {
        &self.db
    }

    /// Add a card with default state for both algorithms.
    pub async fn add_card(&self, new_card: NewCard, now: DateTime<Utc>) -> Result<Card> {
        let front = new_card.front.trim();
        let back = new_card.back.trim();
        if front.is_empty() || back.is_empty() {
            return Err(ServiceError::BadRequest(
                "card front and back must not be empty".to_string(),
            ));
        }

        let card = self.db.insert_card(front, back, now).await;
        debug!(card_id = card.id, "Added card");
        Ok(card)
    }

    pub async fn get_card(&self, card_id: i64) -> Result<Card> {
        self.db
            .get_card(card_id)
            .await
            .ok_or_else(|| ServiceError::NotFound(format!("Card {card_id}")))
    }

    pub async fn delete_card(&self, card_id: i64) -> Result<()> {
        if self.db.delete_card(card_id).await {
            info!(card_id, "Deleted card");
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("Card {card_id}")))
        }
    }

    /// Build the review queue for one algorithm.
    pub async fn due_queue(&self, algorithm: Algorithm, now: DateTime<Utc>) -> DueQueue {
        let cards = self.db.all_cards().await;
        let selection = DueSelection::select(&cards, algorithm, now);

        info!(
            algorithm = %algorithm,
            due = selection.due_count,
            "Found {} cards due for review",
            selection.due_count
        );
        if selection.is_fallback() {
            info!(
                algorithm = %algorithm,
                "No cards due, returning all {} cards",
                selection.cards.len()
            );
        }

        DueQueue {
            algorithm,
            due_count: selection.due_count,
            cards: selection.cards.into_iter().map(CardSummary::from).collect(),
        }
    }

    /// Record one review.
    ///
    /// The card stays locked from load to persist, so concurrent reviews of
    /// the same card apply one after another. Any error leaves the card, the
    /// review log and the activity log untouched.
    pub async fn review(&self, request: ReviewRequest, now: DateTime<Utc>) -> Result<ReviewResponse> {
        let result = self.apply_review(&request, now).await;
        if let Err(e) = &result {
            warn!(
                card_id = request.card_id,
                algorithm = %request.algorithm,
                rating = request.rating,
                kind = e.kind(),
                "Rejected review: {e}"
            );
        }
        result
    }

    async fn apply_review(&self, request: &ReviewRequest, now: DateTime<Utc>) -> Result<ReviewResponse> {
        let rating = Rating::from_value(request.rating)?;

        let mut card = self
            .db
            .lock_card(request.card_id)
            .await
            .ok_or_else(|| ServiceError::NotFound(format!("Card {}", request.card_id)))?;

        let previous_value = card.tracked_value(request.algorithm);
        let update = self
            .scheduler
            .schedule(&card, request.algorithm, rating, now)?;
        let next_review = update.next_review();
        card.apply(update);
        let new_value = card.tracked_value(request.algorithm);

        self.db
            .insert_review(ReviewEvent {
                session_id: request.session_id.clone(),
                card_id: card.id,
                algorithm: request.algorithm,
                rating,
                previous_value,
                new_value,
                review_time_secs: request.review_time_secs,
                reviewed_at: now,
            })
            .await;
        self.db
            .insert_activity(UserActivity {
                session_id: request.session_id.clone(),
                action: ActivityKind::CardReview,
                timestamp: now,
            })
            .await;

        info!(
            card_id = card.id,
            algorithm = %request.algorithm,
            rating = rating.to_value(),
            "Recorded review: {previous_value} -> {new_value}, next review {next_review}"
        );

        Ok(ReviewResponse {
            card_id: card.id,
            algorithm: request.algorithm,
            previous_value,
            new_value,
            next_review,
        })
    }

    /// Side-by-side statistics over a snapshot of the deck.
    pub async fn statistics(&self) -> Statistics {
        Statistics::from_cards(&self.db.all_cards().await)
    }

    /// Restore every card's scheduling state to its creation defaults.
    ///
    /// Review and activity history is kept; only the cards are reset.
    pub async fn reset_progress(&self, session_id: &str, now: DateTime<Utc>) -> usize {
        let handles = self.db.card_handles().await;
        for handle in &handles {
            handle.lock().await.reset_progress();
        }

        self.db
            .insert_activity(UserActivity {
                session_id: session_id.to_string(),
                action: ActivityKind::ResetProgress,
                timestamp: now,
            })
            .await;

        info!(session_id, cards = handles.len(), "Reset progress");
        handles.len()
    }

    pub async fn reviews(&self) -> Vec<ReviewEvent> {
        self.db.get_reviews().await
    }

    pub async fn card_reviews(&self, card_id: i64) -> Vec<ReviewEvent> {
        self.db.get_reviews_for_card(card_id).await
    }

    pub async fn activities(&self) -> Vec<UserActivity> {
        self.db.get_activities().await
    }

    pub async fn algorithm_performance(&self) -> Vec<AlgorithmPerformance> {
        algorithm_performance(&self.db.get_reviews().await)
    }

    pub async fn daily_analytics(&self) -> Vec<DailyAnalytics> {
        daily_analytics(&self.db.get_reviews().await)
    }
}
