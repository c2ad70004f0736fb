use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Authentication failed ({status}): {message} {location}")]
    Auth {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("API error ({status}): {message} {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP request failed: {source} {location}")]
    Http {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("{operation} timed out after {millis}ms {location}")]
    Timeout {
        operation: &'static str,
        millis: u64,
        location: ErrorLocation,
    },

    #[error("Token issuer mismatch: expected {expected}, found {found} {location}")]
    IssuerMismatch {
        expected: String,
        found: String,
        location: ErrorLocation,
    },

    #[error("Malformed access token: {message} {location}")]
    MalformedToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("No active session {location}")]
    NotSignedIn { location: ErrorLocation },

    #[error("Refusing to delete the calling account {location}")]
    SelfDeletion { location: ErrorLocation },
}

impl PlatformError {
    /// Whether this failure may clear up on retry. Authentication and
    /// authorization failures never do.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } | Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    #[track_caller]
    pub fn auth(status: u16, message: impl Into<String>) -> Self {
        Self::Auth {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(operation: &'static str, millis: u64) -> Self {
        Self::Timeout {
            operation,
            millis,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn issuer_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::IssuerMismatch {
            expected: expected.into(),
            found: found.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::MalformedToken {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_signed_in() -> Self {
        Self::NotSignedIn {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn self_deletion() -> Self {
        Self::SelfDeletion {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for PlatformError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
