//! Demo vocabulary deck for an empty store.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::models::NewCard;
use crate::services::review::ReviewService;

/// Word and definition pairs inserted by [`seed_demo_deck`].
pub const DEMO_DECK: [(&str, &str); 10] = [
    ("ubiquitous", "present, appearing, or found everywhere"),
    ("ephemeral", "lasting for a very short time"),
    (
        "serendipity",
        "the occurrence and development of events by chance in a happy or beneficial way",
    ),
    ("paradigm", "a typical example or pattern of something"),
    ("enigmatic", "difficult to interpret or understand"),
    ("resilient", "able to withstand or recover quickly from difficult conditions"),
    ("cognizant", "having knowledge or awareness"),
    ("arbitrary", "based on random choice or personal whim"),
    ("pragmatic", "dealing with things sensibly and realistically"),
    ("ambivalent", "having mixed feelings or contradictory ideas"),
];

/// Insert the demo deck if the store has no cards yet.
///
/// Returns the number of cards added, zero when the store was not empty.
pub async fn seed_demo_deck(service: &ReviewService, now: DateTime<Utc>) -> Result<usize> {
    let existing = service.db().count_cards().await;
    info!("Found {} existing cards", existing);
    if existing > 0 {
        return Ok(0);
    }

    info!("Creating demo cards...");
    for (front, back) in DEMO_DECK {
        service
            .add_card(
                NewCard {
                    front: front.to_string(),
                    back: back.to_string(),
                },
                now,
            )
            .await?;
        info!("Added card: {}", front);
    }
    info!("Demo cards created successfully");

    Ok(DEMO_DECK.len())
}
