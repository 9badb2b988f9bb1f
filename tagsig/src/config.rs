// tagsig/src/config.rs
//! Timing and session configuration.

use std::time::Duration;

/// Default ceiling for the unlock wait (ms)
pub const UNLOCK_TIMEOUT_MS: u64 = 8000;
/// Interval between unlock polls (ms)
pub const UNLOCK_POLL_INTERVAL_MS: u64 = 20;
/// Default ceiling for the arbiter config wait (ms)
pub const CONFIG_TIMEOUT_MS: u64 = 3000;
/// Upper bound of the randomized delay between config polls (ms)
pub const CONFIG_JITTER_MAX_MS: u64 = 25;

/// Prompt shown by the platform while waiting for a tap
pub const ALERT_TAP: &str = "Please tap the tag and hold it.";
/// Prompt shown once the tag is detected and the action runs
pub const ALERT_WORKING: &str = "Working, please keep holding...";
/// Message shown when an action completed
pub const ALERT_DONE: &str = "Done!";
/// Message shown when an action failed
pub const ALERT_FAILED: &str = "Communication error.";

/// Bounds for the two status poll loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollConfig {
    pub unlock_timeout: Duration,
    pub unlock_poll_interval: Duration,
    pub config_timeout: Duration,
    pub config_jitter_max: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            unlock_timeout: Duration::from_millis(UNLOCK_TIMEOUT_MS),
            unlock_poll_interval: Duration::from_millis(UNLOCK_POLL_INTERVAL_MS),
            config_timeout: Duration::from_millis(CONFIG_TIMEOUT_MS),
            config_jitter_max: Duration::from_millis(CONFIG_JITTER_MAX_MS),
        }
    }
}

impl PollConfig {
    pub fn with_unlock_timeout(mut self, d: Duration) -> Self {
        self.unlock_timeout = d;
        self
    }

    pub fn with_unlock_poll_interval(mut self, d: Duration) -> Self {
        self.unlock_poll_interval = d;
        self
    }

    pub fn with_config_timeout(mut self, d: Duration) -> Self {
        self.config_timeout = d;
        self
    }

    /// A zero jitter bound is treated as 1 ms so the loop always yields.
    pub fn with_config_jitter_max(mut self, d: Duration) -> Self {
        self.config_jitter_max = d;
        self
    }
}

/// Options passed to the platform when a session is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOptions {
    pub alert_message: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alert_message: ALERT_TAP.to_string(),
        }
    }
}
