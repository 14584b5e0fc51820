pub mod review;
pub mod seed;

pub use review::ReviewService;
pub use seed::{seed_demo_deck, DEMO_DECK};
