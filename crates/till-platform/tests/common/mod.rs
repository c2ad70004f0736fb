//! Shared helpers for platform client tests.

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::json;
use till_config::{PlatformConfig, TimeoutConfig};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

#[derive(Serialize)]
pub struct TestClaims {
    pub sub: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

/// Mint an HS256 token carrying the given subject and issuer.
pub fn mint_token(sub: &str, iss: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TestClaims {
        sub: sub.to_string(),
        iss: iss.to_string(),
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

pub fn platform_config(server: &MockServer) -> PlatformConfig {
    PlatformConfig {
        base_url: server.uri(),
        anon_key: "test-anon-key".to_string(),
        site_url: None,
        token_refresh_margin_secs: 60,
    }
}

/// Short deadlines so timeout paths are fast in tests.
pub fn fast_timeouts() -> TimeoutConfig {
    TimeoutConfig {
        profile_ms: 200,
        company_ms: 200,
        branches_ms: 200,
        watchdog_ms: 500,
    }
}

/// Mount the password-grant endpoint returning the given access token.
pub async fn mount_password_grant(server: &MockServer, access_token: &str, user_id: &str) {
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/auth/v1/token"))
        .and(matchers::query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "refresh_token": "refresh-token-1",
            "expires_in": 3600,
            "user": {
                "id": user_id,
                "email": "pat@example.com",
                "user_metadata": { "display_name": "Pat" }
            }
        })))
        .mount(server)
        .await;
}
