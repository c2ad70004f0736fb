use crate::UserMeta;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access/refresh token pair owned by the auth service, mirrored locally.
/// Ends on sign-out or expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserMeta,
}

impl Session {
    /// True when the access token expires within `margin` from now.
    pub fn expires_within(&self, margin: Duration) -> bool {
        let deadline = Utc::now()
            + chrono::Duration::from_std(margin).unwrap_or_else(|_| chrono::Duration::zero());
        self.expires_at <= deadline
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
