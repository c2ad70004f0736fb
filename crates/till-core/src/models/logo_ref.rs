use serde::{Deserialize, Serialize};

/// Typed form of the company logo field: either an absolute URL usable as-is
/// or a private storage path that needs a time-boxed signed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoRef {
    Url(String),
    StoragePath(String),
}

impl LogoRef {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::StoragePath(raw.trim_start_matches('/').to_string())
        }
    }
}
