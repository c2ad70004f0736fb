use crate::{
    CacheConfig, ConfigError, ConfigErrorResult, LoggingConfig, PlatformConfig, RetryConfig,
    StorageConfig, TimeoutConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub platform: PlatformConfig,
    pub retry: RetryConfig,
    pub timeouts: TimeoutConfig,
    pub storage: StorageConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for TILL_CONFIG_DIR env var, else use the platform config dir
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply TILL_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: TILL_CONFIG_DIR env var > platform config dir (e.g.
    /// ~/.config/till on Linux)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("TILL_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        dirs::config_dir()
            .map(|dir| dir.join("till"))
            .ok_or_else(|| ConfigError::config("Cannot determine the user config directory"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.platform.validate()?;
        self.retry.validate()?;
        self.timeouts.validate()?;
        self.storage.validate()?;

        Ok(())
    }

    /// Absolute path to the local cache directory.
    pub fn cache_dir(&self) -> ConfigErrorResult<PathBuf> {
        match &self.cache.dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(Self::config_dir()?.join("cache")),
        }
    }

    /// Log configuration summary (NEVER logs the anon key).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  platform: {}", self.platform.base_url);
        info!(
            "  sign-up redirect: {}",
            self.platform.redirect_target()
        );
        info!(
            "  retry: attempts={}, step={}ms",
            self.retry.max_attempts, self.retry.backoff_step_ms
        );
        info!(
            "  timeouts: profile={}ms, company={}ms, branches={}ms, watchdog={}ms",
            self.timeouts.profile_ms,
            self.timeouts.company_ms,
            self.timeouts.branches_ms,
            self.timeouts.watchdog_ms
        );
        info!(
            "  storage: signed_url_ttl={}s (margin={}s)",
            self.storage.signed_url_ttl_secs, self.storage.signed_url_refresh_margin_secs
        );
        info!(
            "  logging: {:?} (colored: {})",
            self.logging.level.filter(),
            self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Platform
        Self::apply_env_string("TILL_PLATFORM_BASE_URL", &mut self.platform.base_url);
        Self::apply_env_string("TILL_PLATFORM_ANON_KEY", &mut self.platform.anon_key);
        Self::apply_env_option_string("TILL_PLATFORM_SITE_URL", &mut self.platform.site_url);
        Self::apply_env_parse(
            "TILL_PLATFORM_TOKEN_REFRESH_MARGIN_SECS",
            &mut self.platform.token_refresh_margin_secs,
        );

        // Retry
        Self::apply_env_parse("TILL_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse("TILL_RETRY_BACKOFF_STEP_MS", &mut self.retry.backoff_step_ms);

        // Timeouts
        Self::apply_env_parse("TILL_TIMEOUT_PROFILE_MS", &mut self.timeouts.profile_ms);
        Self::apply_env_parse("TILL_TIMEOUT_COMPANY_MS", &mut self.timeouts.company_ms);
        Self::apply_env_parse("TILL_TIMEOUT_BRANCHES_MS", &mut self.timeouts.branches_ms);
        Self::apply_env_parse("TILL_TIMEOUT_WATCHDOG_MS", &mut self.timeouts.watchdog_ms);

        // Storage
        Self::apply_env_parse(
            "TILL_STORAGE_SIGNED_URL_TTL_SECS",
            &mut self.storage.signed_url_ttl_secs,
        );
        Self::apply_env_parse(
            "TILL_STORAGE_SIGNED_URL_REFRESH_MARGIN_SECS",
            &mut self.storage.signed_url_refresh_margin_secs,
        );

        // Cache
        Self::apply_env_option_string("TILL_CACHE_DIR", &mut self.cache.dir);

        // Logging
        Self::apply_env_parse("TILL_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("TILL_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("TILL_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse::<T>()
        {
            *target = parsed;
        }
    }
}
