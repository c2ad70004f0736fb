//! Cache record envelopes. Every record embeds the owning user id so a
//! record written under one session can never leak into another.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use till_core::{Company, Profile};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedProfile {
    pub user_id: Uuid,
    pub profile: Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedCompany {
    pub user_id: Uuid,
    pub company: Company,
}

/// Signed (or absolute) logo URL. Absolute URLs carry no expiry; signed
/// URLs expire a safety margin before their real validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedLogoUrl {
    pub user_id: Uuid,
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedLogoUrl {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now,
            None => false,
        }
    }
}

/// The admin's selected active branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedBranch {
    pub user_id: Uuid,
    pub branch_id: Uuid,
}
