use std::{env, time::Duration};

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Simulated latency of the fake web API's `post` in milliseconds (default: 5)
    pub post_delay_ms: u64,
    /// Simulated latency of the fake web API's `get_all` in milliseconds (default: 1)
    pub get_all_delay_ms: u64,
    /// Capacity of the reconciliation event channel (default: 100)
    pub event_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FAKE_POST_DELAY_MS` - `post` latency in milliseconds (default: 5)
    /// - `FAKE_GET_ALL_DELAY_MS` - `get_all` latency in milliseconds (default: 1)
    /// - `RECONCILE_EVENT_CAPACITY` - event channel capacity, must be non-zero (default: 100)
    pub fn from_env() -> Self {
        Self {
            post_delay_ms: env::var("FAKE_POST_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            get_all_delay_ms: env::var("FAKE_GET_ALL_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            event_capacity: env::var("RECONCILE_EVENT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|capacity| *capacity > 0)
                .unwrap_or(100),
        }
    }

    /// Get the `post` latency as a Duration.
    pub fn post_delay(&self) -> Duration {
        Duration::from_millis(self.post_delay_ms)
    }

    /// Get the `get_all` latency as a Duration.
    pub fn get_all_delay(&self) -> Duration {
        Duration::from_millis(self.get_all_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
