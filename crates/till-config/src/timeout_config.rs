use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Per-call-type deadline constraints
pub const MIN_CALL_TIMEOUT_MS: u64 = 100;
pub const MAX_CALL_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_PROFILE_TIMEOUT_MS: u64 = 12_000;
pub const DEFAULT_COMPANY_TIMEOUT_MS: u64 = 4_500;
pub const DEFAULT_BRANCHES_TIMEOUT_MS: u64 = 4_500;
pub const DEFAULT_WATCHDOG_TIMEOUT_MS: u64 = 8_000;

/// Fixed deadlines raced against every network call, by call type.
///
/// Exceeding a deadline is a timeout failure distinct from a network
/// failure; both are handled as transient by the hydrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub profile_ms: u64,
    pub company_ms: u64,
    pub branches_ms: u64,
    /// Watchdog deadline after which a stalled hydration pass stops
    /// reporting as loading
    pub watchdog_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            profile_ms: DEFAULT_PROFILE_TIMEOUT_MS,
            company_ms: DEFAULT_COMPANY_TIMEOUT_MS,
            branches_ms: DEFAULT_BRANCHES_TIMEOUT_MS,
            watchdog_ms: DEFAULT_WATCHDOG_TIMEOUT_MS,
        }
    }
}

impl TimeoutConfig {
    pub fn profile(&self) -> Duration {
        Duration::from_millis(self.profile_ms)
    }

    pub fn company(&self) -> Duration {
        Duration::from_millis(self.company_ms)
    }

    pub fn branches(&self) -> Duration {
        Duration::from_millis(self.branches_ms)
    }

    pub fn watchdog(&self) -> Duration {
        Duration::from_millis(self.watchdog_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, value) in [
            ("timeouts.profile_ms", self.profile_ms),
            ("timeouts.company_ms", self.company_ms),
            ("timeouts.branches_ms", self.branches_ms),
            ("timeouts.watchdog_ms", self.watchdog_ms),
        ] {
            if !(MIN_CALL_TIMEOUT_MS..=MAX_CALL_TIMEOUT_MS).contains(&value) {
                return Err(ConfigError::config(format!(
                    "{} must be {}-{}, got {}",
                    name, MIN_CALL_TIMEOUT_MS, MAX_CALL_TIMEOUT_MS, value
                )));
            }
        }

        Ok(())
    }
}
