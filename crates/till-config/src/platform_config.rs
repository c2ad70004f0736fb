use crate::{ConfigError, ConfigErrorResult, DEFAULT_BASE_URL, DEFAULT_TOKEN_REFRESH_MARGIN_SECS};

use serde::Deserialize;

pub const MIN_TOKEN_REFRESH_MARGIN_SECS: u64 = 5;
pub const MAX_TOKEN_REFRESH_MARGIN_SECS: u64 = 600;

/// Connection settings for the managed backend (auth, rest, storage and
/// function endpoints all hang off the same base URL).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Project base URL, e.g. "https://abc.example.co"
    pub base_url: String,
    /// Public API key sent as the `apikey` header on every request
    pub anon_key: String,
    /// Explicit sign-up redirect target; falls back to base_url when unset
    pub site_url: Option<String>,
    /// Refresh the access token when it is this close to expiry
    pub token_refresh_margin_secs: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            anon_key: String::new(),
            site_url: None,
            token_refresh_margin_secs: DEFAULT_TOKEN_REFRESH_MARGIN_SECS,
        }
    }
}

impl PlatformConfig {
    /// The redirect target for sign-up confirmation links.
    /// Priority: explicit site_url > base_url origin.
    pub fn redirect_target(&self) -> &str {
        self.site_url.as_deref().unwrap_or(&self.base_url)
    }

    /// Issuer expected on every access token minted for this project.
    pub fn expected_issuer(&self) -> String {
        format!("{}/auth/v1", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::platform("platform.base_url must be set"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::platform(format!(
                "platform.base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }

        if self.token_refresh_margin_secs < MIN_TOKEN_REFRESH_MARGIN_SECS
            || self.token_refresh_margin_secs > MAX_TOKEN_REFRESH_MARGIN_SECS
        {
            return Err(ConfigError::platform(format!(
                "platform.token_refresh_margin_secs must be {}-{}, got {}",
                MIN_TOKEN_REFRESH_MARGIN_SECS,
                MAX_TOKEN_REFRESH_MARGIN_SECS,
                self.token_refresh_margin_secs
            )));
        }

        Ok(())
    }
}
