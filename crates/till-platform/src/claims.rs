use crate::error::{PlatformError, Result as PlatformResult};

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims read from an access token's payload.
///
/// Decoded without signature verification: this client never holds the
/// signing secret, and authorization ground truth is enforced server-side.
/// The claims are used for the issuer check and the self-deletion guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: String,
    /// Issuing authority, `{base_url}/auth/v1` for this project
    pub iss: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT.
    #[track_caller]
    pub fn decode(token: &str) -> PlatformResult<Self> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
            _ => return Err(PlatformError::malformed_token("expected three segments")),
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| PlatformError::malformed_token(format!("payload base64: {e}")))?;

        let claims: TokenClaims = serde_json::from_slice(&bytes)
            .map_err(|e| PlatformError::malformed_token(format!("payload json: {e}")))?;

        claims.validate()?;
        Ok(claims)
    }

    /// Structural validation after decoding.
    #[track_caller]
    pub fn validate(&self) -> PlatformResult<()> {
        if self.sub.is_empty() {
            return Err(PlatformError::malformed_token("sub cannot be empty"));
        }
        if self.iss.is_empty() {
            return Err(PlatformError::malformed_token("iss cannot be empty"));
        }
        Ok(())
    }

    /// True when the token expires within `margin` from now.
    pub fn expires_within(&self, margin: Duration) -> bool {
        self.exp - Utc::now().timestamp() <= margin.as_secs() as i64
    }
}
