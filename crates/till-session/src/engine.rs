use crate::error::{Result as SessionResult, SessionError};
use crate::hydrator::{ProfileHydrator, ProfileOutcome};
use crate::pass::{PassCounter, PassTicket};
use crate::resolver::{CompanyContext, CompanyResolver};
use crate::snapshot::SessionSnapshot;
use crate::watchdog::Watchdog;

use std::sync::Arc;

use log::{debug, info, warn};
use till_cache::CacheStore;
use till_config::Config;
use till_core::{Profile, Session, UserMeta};
use till_platform::{AuthClient, AuthEvent, RestClient, StorageClient};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Orchestrates the session lifecycle: reacts to auth transitions, runs
/// hydration passes, and owns the published snapshot.
///
/// Every pass draws a ticket from the pass counter; results only commit
/// while the ticket is still the newest, so overlapping passes resolve to
/// the last-issued one without any cancellation machinery.
pub struct SessionEngine {
    auth: Arc<AuthClient>,
    hydrator: ProfileHydrator,
    resolver: CompanyResolver,
    cache: Arc<CacheStore>,
    state: Arc<RwLock<SessionSnapshot>>,
    passes: PassCounter,
    watchdog: Watchdog,
    last_user: Mutex<Option<Uuid>>,
}

impl SessionEngine {
    pub fn new(
        config: &Config,
        auth: Arc<AuthClient>,
        rest: Arc<RestClient>,
        storage: Arc<StorageClient>,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self {
            auth,
            hydrator: ProfileHydrator::new(
                Arc::clone(&rest),
                Arc::clone(&cache),
                config.retry.clone(),
            ),
            resolver: CompanyResolver::new(rest, storage, Arc::clone(&cache), config.storage.clone()),
            cache,
            state: Arc::new(RwLock::new(SessionSnapshot::default())),
            passes: PassCounter::default(),
            watchdog: Watchdog::new(config.timeouts.watchdog()),
            last_user: Mutex::new(None),
        }
    }

    pub fn auth(&self) -> &Arc<AuthClient> {
        &self.auth
    }

    /// Current published state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<Session> {
        Ok(self.auth.sign_in(email, password).await?)
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> SessionResult<Option<Session>> {
        Ok(self.auth.sign_up(email, password, name).await?)
    }

    /// User-initiated sign-out: revoke upstream, purge everything local.
    pub async fn sign_out(&self) -> SessionResult<()> {
        self.auth.sign_out().await?;
        self.clear().await;
        Ok(())
    }

    /// React to one auth transition. Refresh events for the user already
    /// hydrated are deduplicated; they carry no new identity state.
    pub async fn handle_event(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn { user } | AuthEvent::TokenRefreshed { user } => {
                {
                    let mut last = self.last_user.lock().await;
                    if *last == Some(user.id) {
                        debug!("Already hydrated for {}, skipping", user.id);
                        return;
                    }
                    *last = Some(user.id);
                }
                self.hydrate(user).await;
            }
            AuthEvent::SignedOut => self.clear().await,
        }
    }

    /// Run one hydration pass for the session currently held by the auth
    /// client.
    pub async fn hydrate_current(&self) -> SessionResult<()> {
        let session = self
            .auth
            .current_session()
            .await
            .ok_or_else(SessionError::not_signed_in)?;
        self.hydrate(session.user).await;
        Ok(())
    }

    /// One complete hydration pass: session -> profile -> company ->
    /// branches. Never fails outward; every failure mode degrades into some
    /// committed snapshot (or a forced sign-out on soft-delete).
    pub async fn hydrate(&self, user: UserMeta) {
        let ticket = self.passes.begin();
        self.watchdog.arm(ticket, Arc::clone(&self.state)).await;
        debug!("Hydration pass {} started for {}", ticket.seq(), user.id);

        {
            let mut state = self.state.write().await;
            if self.passes.is_current(ticket) {
                state.loading = true;
                state.user = Some(user.clone());
            }
        }

        // Phase 1: optimistic cache apply for instant UI state
        if let Some(cached) = self.hydrator.cached(user.id) {
            if cached.is_deleted() {
                warn!("Cached profile for {} is soft-deleted, terminating session", user.id);
                self.watchdog.disarm(ticket).await;
                self.force_sign_out().await;
                return;
            }
            if self.passes.is_current(ticket) {
                self.state.write().await.apply_profile(cached);
            }
        }

        // Phase 2: authoritative resolution
        let token = match self.auth.fresh_access_token().await {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("No usable access token for hydration: {e}");
                None
            }
        };

        let outcome = match &token {
            Some(token) => self.hydrator.resolve(token, &user).await,
            None => self.hydrator.fallback(&user),
        };

        let (profile, fresh) = match outcome {
            ProfileOutcome::Deleted => {
                warn!("Profile for {} is soft-deleted, terminating session", user.id);
                self.watchdog.disarm(ticket).await;
                self.force_sign_out().await;
                return;
            }
            ProfileOutcome::Fresh(profile) => (profile, true),
            ProfileOutcome::CachedFallback(profile) | ProfileOutcome::Placeholder(profile) => {
                (profile, false)
            }
        };

        let roles = profile.role_set();
        let context = match &token {
            Some(token) => self.resolver.resolve(token, &profile, &roles).await,
            None => self.resolver.offline(&profile, &roles),
        };

        if !self.passes.is_current(ticket) {
            debug!("Hydration pass {} superseded, discarding results", ticket.seq());
            self.watchdog.disarm(ticket).await;
            return;
        }

        self.commit(ticket, user, profile, fresh, context).await;
    }

    async fn commit(
        &self,
        ticket: PassTicket,
        user: UserMeta,
        profile: Profile,
        fresh: bool,
        context: CompanyContext,
    ) {
        // Only authoritative rows refresh the cache; fallbacks came from it
        if fresh && let Err(e) = self.cache.store_profile(user.id, &profile) {
            warn!("Failed to cache profile: {e}");
        }
        if let Some(company) = &context.company
            && let Err(e) = self.cache.store_company(user.id, company)
        {
            warn!("Failed to cache company: {e}");
        }

        {
            let mut state = self.state.write().await;
            // Re-checked under the write lock so a just-issued pass cannot
            // be overwritten by this one
            if !self.passes.is_current(ticket) {
                debug!("Hydration pass {} superseded at commit", ticket.seq());
                return;
            }
            state.user = Some(user.clone());
            state.apply_profile(profile);
            state.company = context.company;
            state.logo_url = context.logo_url;
            state.branches = context.branches;
            state.active_branch_id = context.active_branch_id;
            state.active_branch_name = context.active_branch_name;
            state.loading = false;
        }

        self.watchdog.disarm(ticket).await;
        info!("Hydration pass {} committed for {}", ticket.seq(), user.id);
    }

    /// Session termination that does not originate from the user: the
    /// profile row turned out to be soft-deleted. Purges cache and state and
    /// revokes the session; revocation failure still clears locally.
    pub async fn force_sign_out(&self) {
        if let Err(e) = self.auth.sign_out().await {
            warn!("Forced sign-out revocation failed: {e}");
        }
        self.clear().await;
    }

    /// Admin-only: make a branch the active one and persist the selection.
    /// The selection survives restarts but not sign-out.
    pub async fn select_branch(&self, branch_id: Uuid) -> SessionResult<()> {
        let (user_id, is_admin, name) = {
            let state = self.state.read().await;
            (
                state.user.as_ref().map(|u| u.id),
                state.roles.is_admin(),
                state
                    .branches
                    .iter()
                    .find(|b| b.id == branch_id)
                    .map(|b| b.name.clone()),
            )
        };

        let user_id = user_id.ok_or_else(SessionError::not_signed_in)?;
        if !is_admin {
            return Err(SessionError::not_admin());
        }

        self.cache.set_active_branch(user_id, branch_id)?;

        let mut state = self.state.write().await;
        state.active_branch_id = Some(branch_id);
        state.active_branch_name = name;
        info!("Active branch set to {branch_id}");
        Ok(())
    }

    /// Admin-only: drop the persisted branch selection.
    pub async fn clear_branch(&self) -> SessionResult<()> {
        let is_admin = {
            let state = self.state.read().await;
            if state.user.is_none() {
                return Err(SessionError::not_signed_in());
            }
            state.roles.is_admin()
        };
        if !is_admin {
            return Err(SessionError::not_admin());
        }

        self.cache.clear_active_branch();

        let mut state = self.state.write().await;
        state.active_branch_id = None;
        state.active_branch_name = None;
        Ok(())
    }

    /// Reset to the signed-out state and purge the cache. Idempotent; runs
    /// on every SignedOut regardless of who initiated it.
    async fn clear(&self) {
        // Supersede any in-flight pass so it cannot commit after the purge
        self.passes.begin();
        *self.last_user.lock().await = None;
        self.cache.clear_all();
        *self.state.write().await = SessionSnapshot::default();
        info!("Session state cleared");
    }
}
