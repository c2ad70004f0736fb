use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Retry constraints
pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const MAX_BACKOFF_STEP_MS: u64 = 10000;
pub const DEFAULT_BACKOFF_STEP_MS: u64 = 300;

/// Retry configuration for transient profile-fetch failures.
///
/// Backoff is linear: the delay before attempt N+1 is N x backoff_step_ms.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of fetch attempts (including the initial attempt)
    pub max_attempts: u32,
    /// Linear backoff step in milliseconds
    pub backoff_step_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_step_ms: DEFAULT_BACKOFF_STEP_MS,
        }
    }
}

impl RetryConfig {
    /// Delay to wait after the given 1-based attempt number fails.
    pub fn delay_after(&self, attempt: u32) -> std::time::Duration {
        std::time::Duration::from_millis(self.backoff_step_ms * u64::from(attempt))
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts < MIN_MAX_ATTEMPTS || self.max_attempts > MAX_MAX_ATTEMPTS {
            return Err(ConfigError::config(format!(
                "retry.max_attempts must be {}-{}, got {}",
                MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS, self.max_attempts
            )));
        }

        if self.backoff_step_ms > MAX_BACKOFF_STEP_MS {
            return Err(ConfigError::config(format!(
                "retry.backoff_step_ms must be at most {}, got {}",
                MAX_BACKOFF_STEP_MS, self.backoff_step_ms
            )));
        }

        Ok(())
    }
}
