//! Shared harness for hydration engine tests: a mock platform, a temp
//! cache directory, and an engine wired like production.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::json;
use tempfile::TempDir;
use till_cache::CacheStore;
use till_config::Config;
use till_core::UserMeta;
use till_platform::{AuthClient, RestClient, StorageClient};
use till_session::SessionEngine;
use uuid::Uuid;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    iss: String,
    exp: i64,
    iat: i64,
}

/// Mint an HS256 token whose issuer matches the mock platform.
pub fn mint_token(sub: Uuid, server: &MockServer) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TestClaims {
        sub: sub.to_string(),
        iss: format!("{}/auth/v1", server.uri()),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"test-secret-key-at-least-32-bytes"),
    )
    .unwrap()
}

pub struct TestHarness {
    pub server: MockServer,
    pub engine: Arc<SessionEngine>,
    pub cache: Arc<CacheStore>,
    pub config: Config,
    _cache_dir: TempDir,
}

/// Harness with deadlines short enough that failure paths finish fast.
pub async fn harness() -> TestHarness {
    harness_with(|_| {}).await
}

pub async fn harness_with(adjust: impl FnOnce(&mut Config)) -> TestHarness {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    let mut config = Config::default();
    config.platform.base_url = server.uri();
    config.platform.anon_key = "test-anon-key".to_string();
    config.retry.max_attempts = 3;
    config.retry.backoff_step_ms = 10;
    config.timeouts.profile_ms = 200;
    config.timeouts.company_ms = 200;
    config.timeouts.branches_ms = 200;
    config.timeouts.watchdog_ms = 2_000;
    adjust(&mut config);

    let auth = Arc::new(AuthClient::new(&config.platform));
    let rest = Arc::new(RestClient::new(&config.platform, &config.timeouts));
    let storage = Arc::new(StorageClient::new(&config.platform, &config.timeouts));
    let cache = Arc::new(CacheStore::new(cache_dir.path()));

    let engine = Arc::new(SessionEngine::new(
        &config,
        auth,
        rest,
        storage,
        Arc::clone(&cache),
    ));

    TestHarness {
        server,
        engine,
        cache,
        config,
        _cache_dir: cache_dir,
    }
}

impl TestHarness {
    /// Mount the password grant and sign in as the given user so the engine
    /// holds a valid session before hydrating.
    pub async fn sign_in_as(&self, user_id: Uuid) -> UserMeta {
        let token = mint_token(user_id, &self.server);
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/v1/token"))
            .and(matchers::query_param("grant_type", "password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": token,
                "refresh_token": "refresh-token-1",
                "expires_in": 3600,
                "user": {
                    "id": user_id,
                    "email": "pat@example.com",
                    "user_metadata": { "display_name": "Pat" }
                }
            })))
            .mount(&self.server)
            .await;

        self.engine
            .sign_in("pat@example.com", "hunter2")
            .await
            .unwrap()
            .user
    }

    /// Mount the logout endpoint; forced sign-outs revoke through it.
    pub async fn mount_logout(&self) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }
}

/// Profile row payload as the rest endpoint returns it.
pub fn profile_row(
    user_id: Uuid,
    role: &str,
    is_admin: bool,
    company_id: Option<Uuid>,
) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "user_id": user_id,
        "display_name": "Pat",
        "role": role,
        "is_admin": is_admin,
        "company_id": company_id,
        "branch_id": null,
        "deleted_at": null,
        "deleted_by": null,
        "deletion_reason": null
    })
}

pub fn company_row(company_id: Uuid, logo: Option<&str>) -> serde_json::Value {
    json!({
        "id": company_id,
        "name": "Acme Retail",
        "address": "1 High Street",
        "phone": null,
        "email": null,
        "receipt_footer": null,
        "logo": logo
    })
}
