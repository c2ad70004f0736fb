//! Edge Caller: authenticated invocation of the privileged serverless
//! operations (employee lifecycle and company repair). These operations run
//! outside row-level policies, so every call carries a freshly validated
//! bearer token.

use crate::auth::AuthClient;
use crate::claims::TokenClaims;
use crate::error::{PlatformError, Result as PlatformResult};

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::Serialize;
use serde_json::{Value, json};
use till_config::PlatformConfig;
use till_core::Role;
use uuid::Uuid;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Payload for the create-employee operation.
#[derive(Debug, Clone, Serialize)]
pub struct NewEmployee {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<Uuid>,
}

/// Partial update for the update-employee operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<Uuid>,
}

pub struct EdgeCaller {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    expected_issuer: String,
    auth: Arc<AuthClient>,
}

impl EdgeCaller {
    pub fn new(config: &PlatformConfig, auth: Arc<AuthClient>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            expected_issuer: config.expected_issuer(),
            auth,
        }
    }

    /// Invoke a named privileged operation with a JSON body.
    ///
    /// The access token is refreshed when near expiry and its issuing
    /// authority must match this project; a stale cross-environment token
    /// is rejected before any network traffic.
    pub async fn invoke(&self, name: &str, body: &Value) -> PlatformResult<Value> {
        let token = self.auth.fresh_access_token().await?;
        self.check_issuer(&token)?;

        let url = format!("{}/functions/v1/{name}", self.base_url);
        debug!("Invoking privileged operation {name}");

        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let payload = resp.json::<Value>().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(PlatformError::api(
                status.as_u16(),
                edge_error_message(&payload),
            ));
        }

        Ok(payload)
    }

    pub async fn create_employee(&self, employee: &NewEmployee) -> PlatformResult<Value> {
        let body = serde_json::to_value(employee)
            .map_err(|e| PlatformError::api(0, e.to_string()))?;
        self.invoke("create-employee", &body).await
    }

    pub async fn update_employee(
        &self,
        target_user_id: Uuid,
        update: &EmployeeUpdate,
    ) -> PlatformResult<Value> {
        let mut body = serde_json::to_value(update)
            .map_err(|e| PlatformError::api(0, e.to_string()))?;
        body["target_user_id"] = json!(target_user_id);
        self.invoke("update-employee", &body).await
    }

    /// Soft-delete an employee (timestamp + actor + reason); `hard` also
    /// removes the underlying identity. Self-deletion is rejected locally
    /// before any request is issued.
    pub async fn delete_employee(
        &self,
        target_user_id: Uuid,
        reason: Option<&str>,
        hard: bool,
    ) -> PlatformResult<Value> {
        let claims = self.auth.claims().await?;
        if claims.sub == target_user_id.to_string() {
            return Err(PlatformError::self_deletion());
        }

        let body = json!({
            "target_user_id": target_user_id,
            "reason": reason,
            "hard_delete": hard,
        });
        self.invoke("delete-employee", &body).await
    }

    /// Ask the backend to backfill a missing company linkage for the caller.
    pub async fn repair_missing_company_id(&self) -> PlatformResult<Value> {
        self.invoke("repair-missing-company-id", &json!({})).await
    }

    fn check_issuer(&self, token: &str) -> PlatformResult<()> {
        let claims = TokenClaims::decode(token)?;
        if claims.iss != self.expected_issuer {
            return Err(PlatformError::issuer_mismatch(
                self.expected_issuer.clone(),
                claims.iss,
            ));
        }
        Ok(())
    }
}

fn edge_error_message(body: &Value) -> String {
    if let Some(message) = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return message.to_string();
    }
    for key in ["error", "message"] {
        if let Some(message) = body.get(key).and_then(Value::as_str) {
            return message.to_string();
        }
    }
    "Privileged operation failed".to_string()
}
