use crate::db::models::{App, CachedStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog search parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AppsParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub sort: String,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    20
}

/// Catalog search response
#[derive(Debug, Clone, Serialize)]
pub struct AppsResponse {
    pub results: Vec<AppCard>,
    pub pagination: Pagination,
}

/// One catalog entry in a listing
#[derive(Debug, Clone, Serialize)]
pub struct AppCard {
    pub app_id: String,
    pub name: String,
    pub brief: Option<String>,
    pub install_count: i64,
    pub href: Option<String>,
    pub icon_src: Option<String>,
}

impl From<App> for AppCard {
    fn from(app: App) -> Self {
        Self {
            app_id: app.app_id,
            name: app.name,
            brief: app.brief,
            install_count: app.install_count,
            href: app.href,
            icon_src: app.icon_src,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Catalog entry with its cached statistics, if any
#[derive(Debug, Clone, Serialize)]
pub struct AppDetail {
    pub app: AppCard,
    pub stats: Option<StatsResponse>,
}

/// Request body for adding a catalog entry
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppRequest {
    pub app_id: String,
    pub name: String,
    pub brief: Option<String>,
    #[serde(default)]
    pub install_count: i64,
    pub href: Option<String>,
    pub icon_src: Option<String>,
}

/// Catalog entry deletion response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Query parameters for a stats lookup
#[derive(Debug, Clone, Deserialize)]
pub struct StatsParams {
    /// Bypass the cache and fetch fresh data
    #[serde(default)]
    pub refresh: bool,
}

/// GitHub statistics for one app
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub app_id: String,
    pub github_url: String,
    pub owner: String,
    pub repo: String,
    pub stars: i64,
    pub forks: i64,
    pub watchers: i64,
    pub open_issues: i64,
    pub language: Option<String>,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub repo_updated_at: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
}

impl From<CachedStats> for StatsResponse {
    fn from(stats: CachedStats) -> Self {
        let topics = stats.topics_vec();
        Self {
            app_id: stats.app_id,
            github_url: stats.github_url,
            owner: stats.owner,
            repo: stats.repo,
            stars: stats.stars,
            forks: stats.forks,
            watchers: stats.watchers,
            open_issues: stats.open_issues,
            language: stats.language,
            description: stats.description,
            topics,
            repo_updated_at: stats.repo_updated_at,
            fetched_at: stats.fetched_at,
        }
    }
}

/// Rendered clipboard text
#[derive(Debug, Clone, Serialize)]
pub struct CopyTextResponse {
    pub text: String,
}

/// Batch check request body
#[derive(Debug, Clone, Deserialize)]
pub struct BatchCheckRequest {
    pub apps: Vec<String>,
}

/// Cache clear response
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub evicted: u64,
}

/// Single-entry eviction response
#[derive(Debug, Clone, Serialize)]
pub struct EvictResponse {
    pub evicted: bool,
}

/// GitHub rate-limit passthrough
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitResponse {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: String,
}
