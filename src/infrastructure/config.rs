//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL
    pub database_url: String,

    /// HTTP server port
    pub server_port: u16,

    /// Logs of finished games are kept this many days after their last phase change
    pub event_retention_days: u64,
    /// Seconds between two sweeps of the background worker
    pub sweep_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/events.db".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            event_retention_days: env::var("EVENT_RETENTION_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("EVENT_RETENTION_DAYS must be a whole number of days")?,
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("SWEEP_INTERVAL_SECS must be a whole number of seconds")?,
        })
    }

    /// Saturates on overflow; the sweeper rejects ages it cannot represent
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.event_retention_days.saturating_mul(24 * 60 * 60))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::DEFAULT_MAX_AGE;

    #[test]
    fn test_default_retention_matches_sweeper_default() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            server_port: 3000,
            event_retention_days: 30,
            sweep_interval_secs: 0,
        };
        assert_eq!(config.retention(), DEFAULT_MAX_AGE);
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_huge_retention_does_not_overflow() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            server_port: 3000,
            event_retention_days: u64::MAX,
            sweep_interval_secs: 60,
        };
        assert_eq!(config.retention(), Duration::from_secs(u64::MAX));
    }
}
