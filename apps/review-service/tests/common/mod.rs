//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping a review service over a fresh in-process store
//! - Helper functions for creating cards and reviews

#![allow(dead_code)]

pub mod fixtures;

use chrono::{DateTime, Utc};

use srs_review_service::config::Config;
use srs_review_service::models::{Card, NewCard};
use srs_review_service::services::ReviewService;

/// Test context holding a service with an empty deck.
pub struct TestContext {
    pub service: ReviewService,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            service: srs_review_service::build_service(&config),
        }
    }

    /// Add a card created at `created_at`.
    pub async fn add_card(&self, front: &str, back: &str, created_at: DateTime<Utc>) -> Card {
        self.service
            .add_card(
                NewCard {
                    front: front.to_string(),
                    back: back.to_string(),
                },
                created_at,
            )
            .await
            .expect("Failed to add card")
    }

    /// Add `count` numbered cards, all created at `created_at`.
    pub async fn add_cards(&self, count: usize, created_at: DateTime<Utc>) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count);
        for i in 1..=count {
            cards.push(
                self.add_card(&format!("Question {i}?"), &format!("Answer {i}."), created_at)
                    .await,
            );
        }
        cards
    }
}
