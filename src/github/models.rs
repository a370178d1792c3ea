use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub repository information, as returned by `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: i64,
    pub forks_count: i64,
    pub watchers_count: i64,
    pub open_issues_count: i64,
    pub language: Option<String>,
    pub default_branch: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
}

/// Repository owner information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub id: u64,
}

/// Response of `GET /rate_limit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub rate: RateLimitWindow,
}

/// One rate-limit window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitWindow {
    pub limit: u32,
    pub remaining: u32,
    /// Unix timestamp at which the window resets
    pub reset: i64,
}
