use crate::github::{
    config::GitHubConfig,
    models::{RateLimitStatus, RateLimitWindow, Repository},
};
use crate::{Error, Result};
use chrono::{DateTime, Local};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, error};

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("lazycat-stars/0.1"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        // Add authentication if token is provided
        if let Some(token) = &config.token {
            let auth_value = format!("Bearer {token}");
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Internal(format!("Invalid GitHub token: {e}")))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Make a GET request to the GitHub API.
    ///
    /// Requests are single-shot: failures surface immediately and the user
    /// retries manually.
    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!("GitHub API request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("request failed: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            // On 403 the reset header tells the user when the quota returns
            if status == StatusCode::FORBIDDEN {
                let reset = response
                    .headers()
                    .get("x-ratelimit-reset")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<i64>().ok());

                return Err(match reset.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
                    Some(reset_at) => Error::RateLimited(format!(
                        "GitHub API rate limit exceeded, retry after {}",
                        reset_at.with_timezone(&Local).format("%H:%M:%S")
                    )),
                    None => Error::RateLimited("GitHub API rate limit exceeded".to_string()),
                });
            }

            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            error!("GitHub API error: {} - {}", status, error_body);

            return Err(match status {
                StatusCode::NOT_FOUND => Error::NotFound("GitHub repository not found".to_string()),
                StatusCode::UNAUTHORIZED => {
                    Error::GitHub("authentication failed, check the configured token".to_string())
                }
                _ => Error::GitHub(format!("HTTP {status}")),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::GitHub(format!("failed to parse response: {e}")))
    }

    /// Get repository information
    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository> {
        let path = format!("/repos/{owner}/{repo}");
        self.get(&path).await
    }

    /// Get the current core rate-limit window
    pub async fn get_rate_limit(&self) -> Result<RateLimitWindow> {
        let status: RateLimitStatus = self.get("/rate_limit").await?;
        Ok(status.rate)
    }
}
