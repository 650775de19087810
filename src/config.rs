use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::clock::{parse_timestamp, Clock, FixedClock, SystemClock};

pub const NOW_VAR: &str = "JOBTRACK_NOW";

/// Runtime configuration read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Pins every recency calculation to this instant instead of the wall clock.
    pub now: Option<DateTime<Utc>>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let now = match std::env::var(NOW_VAR) {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_now(&raw)?),
            _ => None,
        };

        Ok(Config {
            now,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn with_now(mut self, now: Option<DateTime<Utc>>) -> Self {
        if now.is_some() {
            self.now = now;
        }
        self
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.now {
            Some(instant) => Box::new(FixedClock(instant)),
            None => Box::new(SystemClock),
        }
    }
}

pub fn parse_now(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_timestamp(raw).with_context(|| format!("{NOW_VAR} must be an RFC 3339 timestamp or date, got '{raw}'"))
}
