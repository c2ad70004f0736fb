//! Signed-URL minting for private storage objects.

use crate::deadline::with_deadline;
use crate::error::{PlatformError, Result as PlatformResult};

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use till_config::{PlatformConfig, TimeoutConfig};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    timeouts: TimeoutConfig,
}

impl StorageClient {
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

    /// Mint a time-boxed signed URL for a private object path
    /// (`bucket/key`), valid for `expires_in_secs`.
    pub async fn create_signed_url(
        &self,
        token: &str,
        path: &str,
        expires_in_secs: u64,
    ) -> PlatformResult<String> {
        let object_path = path.trim_start_matches('/');
        let url = format!("{}/storage/v1/object/sign/{object_path}", self.base_url);

        with_deadline("Signed URL request", self.timeouts.company(), async {
            let resp = self
                .http
                .post(&url)
                .header("apikey", &self.anon_key)
                .bearer_auth(token)
                .json(&json!({ "expiresIn": expires_in_secs }))
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.json::<Value>().await.unwrap_or(Value::Null);
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Signed URL request failed");
                return Err(PlatformError::api(status.as_u16(), message));
            }

            let signed: SignResponse = resp.json().await?;
            // The service returns a path relative to the storage root
            Ok(format!(
                "{}/storage/v1{}",
                self.base_url,
                signed.signed_url
            ))
        })
        .await
    }
}
