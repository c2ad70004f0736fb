use serde::Deserialize;

/// Location of the local persisted cache.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Override for the cache directory; default is `cache/` inside the
    /// config directory
    pub dir: Option<String>,
}
