//! Environment-driven configuration

use srs_core::algorithm::sm2::DEFAULT_MAX_INTERVAL;
use srs_core::Algorithm;

use crate::error::{Result, ServiceError};

/// Runtime configuration, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `RUST_LOG`-style filter for tracing-subscriber.
    pub log_filter: String,
    /// Ceiling for SM-2 intervals, in days.
    pub max_interval_days: u32,
    /// Insert the demo vocabulary deck when the store is empty.
    pub seed_demo_deck: bool,
    /// Algorithm used when a caller does not name one.
    pub default_algorithm: Algorithm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            max_interval_days: DEFAULT_MAX_INTERVAL,
            seed_demo_deck: true,
            default_algorithm: Algorithm::Sm2,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_filter = lookup("RUST_LOG").unwrap_or(defaults.log_filter);

        let max_interval_days = match lookup("SRS_MAX_INTERVAL_DAYS") {
            Some(raw) => {
                let days: u32 = raw.trim().parse().map_err(|_| {
                    ServiceError::Config(format!("SRS_MAX_INTERVAL_DAYS is not a number: {raw}"))
                })?;
                if days == 0 {
                    return Err(ServiceError::Config(
                        "SRS_MAX_INTERVAL_DAYS must be at least 1".to_string(),
                    ));
                }
                days
            }
            None => defaults.max_interval_days,
        };

        let seed_demo_deck = match lookup("SRS_SEED_DEMO_DECK") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ServiceError::Config(format!("SRS_SEED_DEMO_DECK must be true or false: {raw}"))
            })?,
            None => defaults.seed_demo_deck,
        };

        let default_algorithm = match lookup("SRS_DEFAULT_ALGORITHM") {
            Some(raw) => Algorithm::from_str(raw.trim()).ok_or_else(|| {
                ServiceError::Config(format!("Unknown algorithm: {raw}"))
            })?,
            None => defaults.default_algorithm,
        };

        Ok(Self {
            log_filter,
            max_interval_days,
            seed_demo_deck,
            default_algorithm,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
