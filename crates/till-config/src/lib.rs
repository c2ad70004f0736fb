mod cache_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod platform_config;
mod retry_config;
mod storage_config;
mod timeout_config;

pub use cache_config::CacheConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use platform_config::PlatformConfig;
pub use retry_config::RetryConfig;
pub use storage_config::StorageConfig;
pub use timeout_config::TimeoutConfig;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:54321";
const DEFAULT_TOKEN_REFRESH_MARGIN_SECS: u64 = 60;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";

#[cfg(test)]
mod tests;
