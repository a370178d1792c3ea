use crate::utils::validation::validate_app_id;
use crate::{Error, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Client for the LazyCat app-store metadata repository.
///
/// The metarepo serves one JSON document per app. The document has no
/// guaranteed schema; it is handed to the resolver as-is.
pub struct MetarepoClient {
    client: Client,
    base_url: String,
}

impl MetarepoClient {
    pub fn new(base_url: String, user_agent: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the metadata document for an app.
    ///
    /// Single-shot request: any failure surfaces immediately with the HTTP
    /// status, and the caller retries manually.
    pub async fn fetch_metadata(&self, app_id: &str) -> Result<Value> {
        validate_app_id(app_id)?;

        let url = format!("{}/app_{}.json", self.base_url, app_id);
        debug!("Fetching app metadata: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Metadata(format!("metadata fetch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(Error::NotFound(format!("app {app_id} not found in store")));
            }
            return Err(Error::Metadata(format!("metadata fetch failed: HTTP {status}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Metadata(format!("metadata is not valid JSON: {e}")))
    }
}
