pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;

use chrono::Utc;
use srs_core::{Algorithm, Fsrs, Scheduler, Sm2};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::{seed_demo_deck, ReviewService};

/// Build a review service over a fresh in-process store.
pub fn build_service(config: &Config) -> ReviewService {
    let scheduler = Scheduler::new(Sm2::with_max_interval(config.max_interval_days), Fsrs);
    ReviewService::new(Arc::new(Database::new()), scheduler)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        max_interval_days = config.max_interval_days,
        default_algorithm = %config.default_algorithm,
        "Starting review service"
    );

    let service = build_service(&config);

    if config.seed_demo_deck {
        seed_demo_deck(&service, Utc::now()).await?;
    }

    let now = Utc::now();
    let queue = service.due_queue(config.default_algorithm, now).await;
    tracing::info!("Review queue: {}", serde_json::to_string(&queue)?);

    for algorithm in Algorithm::ALL {
        if algorithm != config.default_algorithm {
            service.due_queue(algorithm, now).await;
        }
    }

    let stats = service.statistics().await;
    tracing::info!("Statistics: {}", serde_json::to_string(&stats)?);

    Ok(())
}
