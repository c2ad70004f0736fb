use serde::Serialize;
use till_core::{Branch, Company, Profile, RoleSet, UserMeta};
use uuid::Uuid;

/// Everything the UI layer needs about the signed-in user, resolved by the
/// hydration engine and read under a shared lock.
///
/// The default value is the signed-out state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub user: Option<UserMeta>,
    pub profile: Option<Profile>,
    pub roles: RoleSet,
    pub company: Option<Company>,
    /// Resolved logo URL, signed when the logo lives in private storage
    pub logo_url: Option<String>,
    /// Branch list, only populated for admins
    pub branches: Vec<Branch>,
    pub active_branch_id: Option<Uuid>,
    pub active_branch_name: Option<String>,
    pub needs_company_setup: bool,
    /// True while a hydration pass is in flight
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Apply a resolved profile and the state derived from it.
    pub fn apply_profile(&mut self, profile: Profile) {
        self.roles = profile.role_set();
        self.needs_company_setup = profile.needs_company_setup();
        self.profile = Some(profile);
    }
}
