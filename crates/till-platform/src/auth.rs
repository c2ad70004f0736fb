//! Auth/session provider client: password grant, refresh grant, sign-up,
//! sign-out, and a broadcast stream of session transitions.

use crate::claims::TokenClaims;
use crate::error::{PlatformError, Result as PlatformResult};

use std::time::Duration;

use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use till_config::PlatformConfig;
use till_core::{Session, UserMeta};
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

const EVENT_CHANNEL_CAPACITY: usize = 16;
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Session transition notification.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn { user: UserMeta },
    TokenRefreshed { user: UserMeta },
    SignedOut,
}

/// Token grant response from the auth service.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    display_name: Option<String>,
    full_name: Option<String>,
    name: Option<String>,
}

impl UserMetadata {
    fn best_name(self) -> Option<String> {
        self.display_name.or(self.full_name).or(self.name)
    }
}

/// Authenticated session holder. Owns the in-memory token pair and emits
/// `AuthEvent`s on every transition; listeners drive hydration off those.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    redirect_target: String,
    refresh_margin: Duration,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
}

impl AuthClient {
    pub fn new(config: &PlatformConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            redirect_target: config.redirect_target().to_string(),
            refresh_margin: Duration::from_secs(config.token_refresh_margin_secs),
            session: RwLock::new(None),
            events,
        }
    }

    /// Subscribe to session transitions for the lifetime of the caller.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// The session currently held in memory, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Sign in with the password grant. Credential failures surface to the
    /// caller directly; they are never retried.
    pub async fn sign_in(&self, email: &str, password: &str) -> PlatformResult<Session> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<Value>().await.unwrap_or(Value::Null);
            return Err(PlatformError::auth(
                status.as_u16(),
                auth_error_message(&body),
            ));
        }

        let token: TokenResponse = resp.json().await?;
        let session = self.install(token).await;
        let _ = self.events.send(AuthEvent::SignedIn {
            user: session.user.clone(),
        });
        info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    /// Register a new account. The confirmation redirect goes to the
    /// configured site URL, falling back to the project base URL.
    ///
    /// Returns a session when the project confirms accounts immediately,
    /// None when email confirmation is pending.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> PlatformResult<Option<Session>> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .query(&[("redirect_to", self.redirect_target.as_str())])
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "display_name": name },
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<Value>().await.unwrap_or(Value::Null);
            return Err(PlatformError::auth(
                status.as_u16(),
                auth_error_message(&body),
            ));
        }

        let body: Value = resp.json().await?;
        if body.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(body)
                .map_err(|e| PlatformError::auth(status.as_u16(), e.to_string()))?;
            let session = self.install(token).await;
            let _ = self.events.send(AuthEvent::SignedIn {
                user: session.user.clone(),
            });
            return Ok(Some(session));
        }

        info!("Sign-up accepted for {email}, confirmation pending");
        Ok(None)
    }

    /// Exchange the refresh token for a new token pair.
    pub async fn refresh_session(&self) -> PlatformResult<Session> {
        let refresh_token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or_else(PlatformError::not_signed_in)?;

        let url = format!("{}/auth/v1/token?grant_type=refresh_token", self.base_url);
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<Value>().await.unwrap_or(Value::Null);
            return Err(PlatformError::auth(
                status.as_u16(),
                auth_error_message(&body),
            ));
        }

        let token: TokenResponse = resp.json().await?;
        let session = self.install(token).await;
        let _ = self.events.send(AuthEvent::TokenRefreshed {
            user: session.user.clone(),
        });
        Ok(session)
    }

    /// Drop the local session and attempt upstream token revocation.
    /// Revocation failure only warns; the local session is always cleared.
    pub async fn sign_out(&self) -> PlatformResult<()> {
        let session = self.session.write().await.take();

        if let Some(session) = session {
            let url = format!("{}/auth/v1/logout", self.base_url);
            let result = self
                .http
                .post(&url)
                .header("apikey", &self.anon_key)
                .bearer_auth(&session.access_token)
                .send()
                .await;

            match result {
                Ok(resp) if !resp.status().is_success() => {
                    warn!("Token revocation returned HTTP {}", resp.status());
                }
                Err(e) => warn!("Token revocation failed: {e}"),
                _ => {}
            }
        }

        let _ = self.events.send(AuthEvent::SignedOut);
        Ok(())
    }

    /// Current access token, refreshed first when it is closer to expiry
    /// than the configured margin.
    pub async fn fresh_access_token(&self) -> PlatformResult<String> {
        let session = self
            .current_session()
            .await
            .ok_or_else(PlatformError::not_signed_in)?;

        if session.expires_within(self.refresh_margin) {
            let refreshed = self.refresh_session().await?;
            return Ok(refreshed.access_token);
        }

        Ok(session.access_token)
    }

    /// Claims from the current access token.
    pub async fn claims(&self) -> PlatformResult<TokenClaims> {
        let session = self
            .current_session()
            .await
            .ok_or_else(PlatformError::not_signed_in)?;
        TokenClaims::decode(&session.access_token)
    }

    async fn install(&self, token: TokenResponse) -> Session {
        let session = Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Utc::now() + chrono::Duration::seconds(token.expires_in),
            user: UserMeta {
                id: token.user.id,
                email: token.user.email,
                name: token.user.user_metadata.best_name(),
            },
        };

        *self.session.write().await = Some(session.clone());
        session
    }
}

/// Best-effort descriptive message from an auth error payload.
fn auth_error_message(body: &Value) -> String {
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(message) = body.get(key).and_then(Value::as_str) {
            return message.to_string();
        }
    }
    "Unknown auth error".to_string()
}
