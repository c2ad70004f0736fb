//! Profile entity - the authenticated user's application identity row.

use crate::{Role, RoleSet, UserMeta};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per user. A soft-deleted profile (non-null `deleted_at`) must
/// never be treated as authenticated; callers detecting one force a sign-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub role: Option<Role>,
    #[serde(default)]
    pub is_admin: bool,
    pub company_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
    pub deletion_reason: Option<String>,
}

impl Profile {
    /// Minimal default row used by the idempotent upsert when the fetch
    /// finds no profile for an authenticated user.
    pub fn default_row(meta: &UserMeta) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: meta.id,
            display_name: meta.name.clone().or_else(|| meta.email.clone()),
            role: Some(Role::Staff),
            is_admin: false,
            company_id: None,
            branch_id: None,
            deleted_at: None,
            deleted_by: None,
            deletion_reason: None,
        }
    }

    /// Synthesized local-only profile applied when neither the network nor
    /// the cache can produce a row. Carries no role.
    pub fn placeholder(meta: &UserMeta) -> Self {
        Self {
            id: meta.id,
            user_id: meta.id,
            display_name: meta.name.clone().or_else(|| meta.email.clone()),
            role: None,
            is_admin: false,
            company_id: None,
            branch_id: None,
            deleted_at: None,
            deleted_by: None,
            deletion_reason: None,
        }
    }

    /// Check if profile is soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// A signed-in user without a company linkage still has onboarding to do.
    pub fn needs_company_setup(&self) -> bool {
        self.company_id.is_none()
    }

    /// Derive the authorization set for this profile.
    pub fn role_set(&self) -> RoleSet {
        RoleSet::from_profile(self)
    }
}
