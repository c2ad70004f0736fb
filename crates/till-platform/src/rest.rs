//! Relational row reads (and the one profile upsert) against the rest
//! endpoint. All predicates are exact-match filters; every call races a
//! fixed per-call-type deadline.

use crate::deadline::with_deadline;
use crate::error::{PlatformError, Result as PlatformResult};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use till_config::{PlatformConfig, TimeoutConfig};
use till_core::{Branch, Company, Profile};
use uuid::Uuid;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    timeouts: TimeoutConfig,
}

impl RestClient {
    pub fn new(config: &PlatformConfig, timeouts: &TimeoutConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            timeouts: timeouts.clone(),
        }
    }

    /// Profile row for a user. Soft-deleted rows are returned deliberately:
    /// the hydrator must see `deleted_at` to force a sign-out.
    pub async fn fetch_profile(
        &self,
        token: &str,
        user_id: Uuid,
    ) -> PlatformResult<Option<Profile>> {
        let path = format!("/rest/v1/profiles?user_id=eq.{user_id}&limit=1");
        with_deadline("Profile fetch", self.timeouts.profile(), async {
            let rows: Vec<Profile> = self.rows(token, &path).await?;
            Ok(rows.into_iter().next())
        })
        .await
    }

    /// Idempotent upsert of a minimal profile row; returns the stored row.
    pub async fn upsert_profile(&self, token: &str, profile: &Profile) -> PlatformResult<Profile> {
        let url = format!("{}/rest/v1/profiles", self.base_url);
        with_deadline("Profile upsert", self.timeouts.profile(), async {
            let resp = self
                .http
                .post(&url)
                .header("apikey", &self.anon_key)
                .header("Prefer", "resolution=merge-duplicates,return=representation")
                .bearer_auth(token)
                .json(&[profile])
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.json::<Value>().await.unwrap_or(Value::Null);
                return Err(PlatformError::api(status.as_u16(), rest_error_message(&body)));
            }

            let mut rows: Vec<Profile> = resp.json().await?;
            rows.pop()
                .ok_or_else(|| PlatformError::api(status.as_u16(), "Upsert returned no row"))
        })
        .await
    }

    pub async fn fetch_company(
        &self,
        token: &str,
        company_id: Uuid,
    ) -> PlatformResult<Option<Company>> {
        let path = format!("/rest/v1/companies?id=eq.{company_id}&limit=1");
        with_deadline("Company fetch", self.timeouts.company(), async {
            let rows: Vec<Company> = self.rows(token, &path).await?;
            Ok(rows.into_iter().next())
        })
        .await
    }

    /// Active branches of a company, ordered by name.
    pub async fn fetch_branches(
        &self,
        token: &str,
        company_id: Uuid,
    ) -> PlatformResult<Vec<Branch>> {
        let path = format!(
            "/rest/v1/branches?company_id=eq.{company_id}&is_active=eq.true&select=id,name&order=name.asc"
        );
        with_deadline("Branch list fetch", self.timeouts.branches(), async {
            self.rows(token, &path).await
        })
        .await
    }

    /// Single targeted branch lookup (active-branch name resolution).
    pub async fn fetch_branch(&self, token: &str, branch_id: Uuid) -> PlatformResult<Option<Branch>> {
        let path = format!("/rest/v1/branches?id=eq.{branch_id}&select=id,name&limit=1");
        with_deadline("Branch fetch", self.timeouts.branches(), async {
            let rows: Vec<Branch> = self.rows(token, &path).await?;
            Ok(rows.into_iter().next())
        })
        .await
    }

    /// Execute a row read and decode the result set.
    async fn rows<T: DeserializeOwned>(&self, token: &str, path: &str) -> PlatformResult<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<Value>().await.unwrap_or(Value::Null);
            return Err(PlatformError::api(status.as_u16(), rest_error_message(&body)));
        }

        Ok(resp.json().await?)
    }
}

fn rest_error_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown API error")
        .to_string()
}
