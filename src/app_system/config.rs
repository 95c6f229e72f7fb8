//! Configuration loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeConfig {
    /// Directory for the file-backed store; `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    /// Simulated payment latency in milliseconds
    pub checkout_delay_ms: u64,
    /// Simulated login latency in milliseconds
    pub login_delay_ms: u64,
    /// Buffer size of each service's request channel
    pub channel_capacity: usize,
    /// Load the sample menu at startup
    pub seed_menu: bool,
}

impl Default for CafeConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            checkout_delay_ms: 1500,
            login_delay_ms: 1000,
            channel_capacity: 32,
            seed_menu: true,
        }
    }
}

impl CafeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("CAFE_DATA_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            checkout_delay_ms: parsed("CAFE_CHECKOUT_DELAY_MS").unwrap_or(defaults.checkout_delay_ms),
            login_delay_ms: parsed("CAFE_LOGIN_DELAY_MS").unwrap_or(defaults.login_delay_ms),
            channel_capacity: parsed("CAFE_CHANNEL_CAPACITY")
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.channel_capacity),
            seed_menu: parsed("CAFE_SEED_MENU").unwrap_or(defaults.seed_menu),
        }
    }

    /// No simulated latency; handy for tests and scripted runs.
    pub fn without_delays(mut self) -> Self {
        self.checkout_delay_ms = 0;
        self.login_delay_ms = 0;
        self
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CafeConfig::default();
        assert_eq!(config.checkout_delay(), Duration::from_millis(1500));
        assert_eq!(config.login_delay(), Duration::from_millis(1000));
        assert!(config.seed_menu);
        assert!(config.data_dir.is_none());

        let fast = config.without_delays();
        assert_eq!(fast.checkout_delay(), Duration::ZERO);
        assert_eq!(fast.channel_capacity, 32);
    }
}
