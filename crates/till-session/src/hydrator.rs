use std::sync::Arc;

use log::warn;
use till_cache::CacheStore;
use till_config::RetryConfig;
use till_core::{Profile, UserMeta};
use till_platform::RestClient;
use uuid::Uuid;

/// What a hydration pass learned about the profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    /// Authoritative row straight from the service
    Fresh(Profile),
    /// Network gave up; the last cached row stands in
    CachedFallback(Profile),
    /// Neither network nor cache produced a row
    Placeholder(Profile),
    /// The row is soft-deleted; the session must be terminated
    Deleted,
}

/// Resolves the profile row for an authenticated user: authoritative fetch
/// with bounded linear-backoff retry, idempotent default-row provisioning
/// when no row exists, and graceful degradation through the cache.
pub struct ProfileHydrator {
    rest: Arc<RestClient>,
    cache: Arc<CacheStore>,
    retry: RetryConfig,
}

impl ProfileHydrator {
    pub fn new(rest: Arc<RestClient>, cache: Arc<CacheStore>, retry: RetryConfig) -> Self {
        Self { rest, cache, retry }
    }

    /// Optimistic cache read applied before any network work.
    pub fn cached(&self, user_id: Uuid) -> Option<Profile> {
        self.cache.load_profile(user_id)
    }

    /// Authoritative fetch. Transient failures (network errors, deadline
    /// overruns, 5xx) are retried with linear backoff; anything else, or
    /// exhaustion, degrades through `fallback`.
    pub async fn resolve(&self, token: &str, meta: &UserMeta) -> ProfileOutcome {
        for attempt in 1..=self.retry.max_attempts {
            match self.rest.fetch_profile(token, meta.id).await {
                Ok(Some(profile)) if profile.is_deleted() => return ProfileOutcome::Deleted,
                Ok(Some(profile)) => return ProfileOutcome::Fresh(profile),
                Ok(None) => return self.provision(token, meta).await,
                Err(e) if e.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        "Profile fetch attempt {attempt}/{} failed: {e}; retrying in {delay:?}",
                        self.retry.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!("Profile fetch gave up on attempt {attempt}: {e}");
                    break;
                }
            }
        }

        self.fallback(meta)
    }

    /// Degrade without the network at all (no usable token). Same cache
    /// preference order as post-retry fallback.
    pub(crate) fn fallback(&self, meta: &UserMeta) -> ProfileOutcome {
        match self.cache.load_profile(meta.id) {
            Some(profile) if profile.is_deleted() => ProfileOutcome::Deleted,
            Some(profile) => ProfileOutcome::CachedFallback(profile),
            None => ProfileOutcome::Placeholder(Profile::placeholder(meta)),
        }
    }

    /// An authenticated user with no profile row gets a minimal default row
    /// via idempotent upsert. If the upsert cannot land, degrade like any
    /// other failure.
    async fn provision(&self, token: &str, meta: &UserMeta) -> ProfileOutcome {
        match self
            .rest
            .upsert_profile(token, &Profile::default_row(meta))
            .await
        {
            Ok(profile) => ProfileOutcome::Fresh(profile),
            Err(e) => {
                warn!("Default profile provisioning failed: {e}");
                self.fallback(meta)
            }
        }
    }
}
