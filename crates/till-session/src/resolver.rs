use std::sync::Arc;

use chrono::Utc;
use log::warn;
use till_cache::CacheStore;
use till_config::StorageConfig;
use till_core::{Branch, Company, LogoRef, Profile, RoleSet};
use till_platform::{RestClient, StorageClient};
use uuid::Uuid;

/// Company-scoped state resolved for one hydration pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyContext {
    pub company: Option<Company>,
    pub logo_url: Option<String>,
    pub branches: Vec<Branch>,
    pub active_branch_id: Option<Uuid>,
    pub active_branch_name: Option<String>,
}

/// Resolves company branding, the branch list, and the active branch for a
/// profile. Fetch failures fall back to the cache; a profile without a
/// company linkage resolves to cleared branding.
pub struct CompanyResolver {
    rest: Arc<RestClient>,
    storage: Arc<StorageClient>,
    cache: Arc<CacheStore>,
    config: StorageConfig,
}

impl CompanyResolver {
    pub fn new(
        rest: Arc<RestClient>,
        storage: Arc<StorageClient>,
        cache: Arc<CacheStore>,
        config: StorageConfig,
    ) -> Self {
        Self {
            rest,
            storage,
            cache,
            config,
        }
    }

    pub async fn resolve(&self, token: &str, profile: &Profile, roles: &RoleSet) -> CompanyContext {
        let user_id = profile.user_id;

        let Some(company_id) = profile.company_id else {
            return CompanyContext::default();
        };

        let company = match self.rest.fetch_company(token, company_id).await {
            // An absent row on a successful fetch clears branding
            Ok(company) => company,
            Err(e) => {
                warn!("Company fetch failed: {e}; serving cached company");
                self.cache.load_company(user_id)
            }
        };

        let logo_url = match &company {
            Some(company) => self.resolve_logo(token, user_id, company).await,
            None => None,
        };

        // Only admins switch branches, so only admins pay for the list
        let branches = if roles.is_admin() {
            match self.rest.fetch_branches(token, company_id).await {
                Ok(branches) => branches,
                Err(e) => {
                    warn!("Branch list fetch failed: {e}");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let active_branch_id = if roles.is_admin() {
            self.cache.active_branch(user_id)
        } else {
            profile.branch_id
        };

        let active_branch_name = match active_branch_id {
            Some(branch_id) => self.branch_name(token, branch_id, &branches).await,
            None => None,
        };

        CompanyContext {
            company,
            logo_url,
            branches,
            active_branch_id,
            active_branch_name,
        }
    }

    /// Cache-only variant for passes that never obtained a usable token.
    pub fn offline(&self, profile: &Profile, roles: &RoleSet) -> CompanyContext {
        let user_id = profile.user_id;

        if profile.company_id.is_none() {
            return CompanyContext::default();
        }

        let company = self.cache.load_company(user_id);
        let logo_url = company
            .as_ref()
            .and_then(|_| self.cache.load_logo_url(user_id, Utc::now()));

        let active_branch_id = if roles.is_admin() {
            self.cache.active_branch(user_id)
        } else {
            profile.branch_id
        };

        CompanyContext {
            company,
            logo_url,
            branches: Vec::new(),
            active_branch_id,
            active_branch_name: None,
        }
    }

    /// Resolve the displayable logo URL.
    ///
    /// Absolute URLs pass through unchanged and cache without expiry. A
    /// private storage path is served from the cached signed URL while that
    /// is valid, otherwise a new one is minted and cached to expire a
    /// safety margin before its real validity ends.
    async fn resolve_logo(&self, token: &str, user_id: Uuid, company: &Company) -> Option<String> {
        let logo_ref = company.logo_ref()?;

        match logo_ref {
            LogoRef::Url(url) => {
                if let Err(e) = self.cache.store_logo_url(user_id, &url, None) {
                    warn!("Failed to cache logo URL: {e}");
                }
                Some(url)
            }
            LogoRef::StoragePath(path) => {
                let now = Utc::now();
                if let Some(cached) = self.cache.load_logo_url(user_id, now) {
                    return Some(cached);
                }

                match self
                    .storage
                    .create_signed_url(token, &path, self.config.signed_url_ttl_secs)
                    .await
                {
                    Ok(url) => {
                        let expires_at =
                            now + chrono::Duration::seconds(self.config.cached_ttl_secs() as i64);
                        if let Err(e) = self.cache.store_logo_url(user_id, &url, Some(expires_at)) {
                            warn!("Failed to cache signed logo URL: {e}");
                        }
                        Some(url)
                    }
                    Err(e) => {
                        warn!("Logo URL signing failed: {e}");
                        None
                    }
                }
            }
        }
    }

    /// Active-branch display name: from the already-fetched list when
    /// possible, otherwise one targeted lookup.
    async fn branch_name(
        &self,
        token: &str,
        branch_id: Uuid,
        branches: &[Branch],
    ) -> Option<String> {
        if let Some(branch) = branches.iter().find(|b| b.id == branch_id) {
            return Some(branch.name.clone());
        }

        match self.rest.fetch_branch(token, branch_id).await {
            Ok(Some(branch)) => Some(branch.name),
            Ok(None) => None,
            Err(e) => {
                warn!("Active branch lookup failed: {e}");
                None
            }
        }
    }
}
