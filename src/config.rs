use std::time::Duration;

use anyhow::Context;

use crate::reaper::ReaperConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://lobbychat.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub reaper: ReaperConfig,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> anyhow::Result<Config> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let defaults = ReaperConfig::default();

        let sweep_interval = match lookup("SWEEP_INTERVAL_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>().with_context(|| format!("SWEEP_INTERVAL_SECS={raw:?} is not a number of seconds"))?,
            ),
            None => defaults.interval,
        };
        if sweep_interval.is_zero() {
            anyhow::bail!("SWEEP_INTERVAL_SECS must be positive");
        }

        let inactivity_timeout_ms = match lookup("INACTIVITY_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("INACTIVITY_TIMEOUT_MS={raw:?} is not a number of milliseconds"))?,
            None => defaults.inactivity_timeout_ms,
        };
        if inactivity_timeout_ms < 0 {
            anyhow::bail!("INACTIVITY_TIMEOUT_MS must not be negative");
        }

        Ok(Config {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            reaper: ReaperConfig { interval: sweep_interval, inactivity_timeout_ms },
        })
    }
}
