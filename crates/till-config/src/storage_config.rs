use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_SIGNED_URL_TTL_SECS: u64 = 60;
pub const MAX_SIGNED_URL_TTL_SECS: u64 = 604_800; // 7 days
pub const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 86_400; // 24 hours
pub const DEFAULT_SIGNED_URL_REFRESH_MARGIN_SECS: u64 = 60;

/// Signed-URL validity for private storage objects (company logos).
///
/// Cached signed URLs expire refresh_margin_secs before the real validity
/// window so a cached value is never served right at the edge of expiry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub signed_url_ttl_secs: u64,
    pub signed_url_refresh_margin_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            signed_url_ttl_secs: DEFAULT_SIGNED_URL_TTL_SECS,
            signed_url_refresh_margin_secs: DEFAULT_SIGNED_URL_REFRESH_MARGIN_SECS,
        }
    }
}

impl StorageConfig {
    /// Lifetime recorded on a cached signed URL: ttl minus the safety margin.
    pub fn cached_ttl_secs(&self) -> u64 {
        self.signed_url_ttl_secs
            .saturating_sub(self.signed_url_refresh_margin_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.signed_url_ttl_secs < MIN_SIGNED_URL_TTL_SECS
            || self.signed_url_ttl_secs > MAX_SIGNED_URL_TTL_SECS
        {
            return Err(ConfigError::config(format!(
                "storage.signed_url_ttl_secs must be {}-{}, got {}",
                MIN_SIGNED_URL_TTL_SECS, MAX_SIGNED_URL_TTL_SECS, self.signed_url_ttl_secs
            )));
        }

        if self.signed_url_refresh_margin_secs >= self.signed_url_ttl_secs {
            return Err(ConfigError::config(format!(
                "storage.signed_url_refresh_margin_secs must be less than the ttl, got {} >= {}",
                self.signed_url_refresh_margin_secs, self.signed_url_ttl_secs
            )));
        }

        Ok(())
    }
}
