use crate::{Profile, Role};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Derived authorization set: the profile's role plus `admin` when the
/// is_admin flag is set. Client-side convenience only; the server enforces
/// ground truth through row policies and the privileged functions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleSet {
    roles: HashSet<Role>,
}

impl RoleSet {
    pub fn from_profile(profile: &Profile) -> Self {
        let mut roles = HashSet::new();
        if let Some(role) = profile.role {
            roles.insert(role);
        }
        if profile.is_admin {
            roles.insert(Role::Admin);
        }
        Self { roles }
    }

    pub fn has(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has(Role::Admin)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
