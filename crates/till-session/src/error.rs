use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use till_cache::CacheError;
use till_platform::PlatformError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Branch selection requires the admin role {location}")]
    NotAdmin { location: ErrorLocation },

    #[error("No active session {location}")]
    NotSignedIn { location: ErrorLocation },
}

impl SessionError {
    #[track_caller]
    pub fn not_admin() -> Self {
        Self::NotAdmin {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_signed_in() -> Self {
        Self::NotSignedIn {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
