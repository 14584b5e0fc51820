//! In-process card store
//!
//! Each card sits behind its own async mutex so that a review can hold the
//! card for the whole load → compute → persist sequence while reviews of
//! other cards proceed. Cross-card reads take a snapshot.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::models::{Card, ReviewEvent, UserActivity};

/// Card store with append-only review and activity logs
#[derive(Default)]
pub struct Database {
    cards: RwLock<BTreeMap<i64, Arc<Mutex<Card>>>>,
    last_card_id: AtomicI64,
    reviews: RwLock<Vec<ReviewEvent>>,
    activities: RwLock<Vec<UserActivity>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    // === Card Repository ===

    /// Insert a card with default scheduling state and a fresh ID
    pub async fn insert_card(&self, front: &str, back: &str, now: DateTime<Utc>) -> Card {
        let id = self.last_card_id.fetch_add(1, Ordering::SeqCst) + 1;
        let card = Card::new(id, front, back, now);
        self.cards
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(card.clone())));
        card
    }

    /// Get a copy of a card
    pub async fn get_card(&self, card_id: i64) -> Option<Card> {
        let handle = self.cards.read().await.get(&card_id).cloned()?;
        let card = handle.lock().await;
        Some(card.clone())
    }

    /// Lock a card for a read-modify-write cycle.
    ///
    /// The guard owns its lock, so it can be held across awaits after the
    /// map lock is released. Returns `None` if the card was deleted while
    /// this call waited for the lock.
    pub async fn lock_card(&self, card_id: i64) -> Option<OwnedMutexGuard<Card>> {
        let handle = self.cards.read().await.get(&card_id).cloned()?;
        let guard = handle.clone().lock_owned().await;
        self.is_live(card_id, &handle).await.then_some(guard)
    }

    /// Remove a card and, with it, both of its scheduling states.
    ///
    /// Waits for any in-flight review of the card to finish first.
    pub async fn delete_card(&self, card_id: i64) -> bool {
        let Some(handle) = self.cards.read().await.get(&card_id).cloned() else {
            return false;
        };
        let _guard = handle.lock().await;

        let mut cards = self.cards.write().await;
        match cards.get(&card_id) {
            Some(current) if Arc::ptr_eq(current, &handle) => {
                cards.remove(&card_id);
                true
            }
            _ => false,
        }
    }

    // Card locks are always taken before the map lock, never the reverse.
    async fn is_live(&self, card_id: i64, handle: &Arc<Mutex<Card>>) -> bool {
        self.cards
            .read()
            .await
            .get(&card_id)
            .is_some_and(|current| Arc::ptr_eq(current, handle))
    }

    /// Snapshot of all cards in ID order
    pub async fn all_cards(&self) -> Vec<Card> {
        let handles: Vec<Arc<Mutex<Card>>> = self.cards.read().await.values().cloned().collect();
        let mut cards = Vec::with_capacity(handles.len());
        for handle in handles {
            cards.push(handle.lock().await.clone());
        }
        cards
    }

    pub async fn count_cards(&self) -> usize {
        self.cards.read().await.len()
    }

    /// Handles to every card, for bulk updates that lock cards one by one
    pub async fn card_handles(&self) -> Vec<Arc<Mutex<Card>>> {
        self.cards.read().await.values().cloned().collect()
    }

    // === Review Repository ===

    /// Append a review record
    pub async fn insert_review(&self, review: ReviewEvent) {
        self.reviews.write().await.push(review);
    }

    pub async fn get_reviews(&self) -> Vec<ReviewEvent> {
        self.reviews.read().await.clone()
    }

    pub async fn get_reviews_for_card(&self, card_id: i64) -> Vec<ReviewEvent> {
        self.reviews
            .read()
            .await
            .iter()
            .filter(|r| r.card_id == card_id)
            .cloned()
            .collect()
    }

    // === Activity Repository ===

    pub async fn insert_activity(&self, activity: UserActivity) {
        self.activities.write().await.push(activity);
    }

    pub async fn get_activities(&self) -> Vec<UserActivity> {
        self.activities.read().await.clone()
    }
}
