use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry for an app-store application
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct App {
    pub id: i64,
    pub app_id: String,
    pub name: String,
    pub brief: Option<String>,
    pub install_count: i64,
    pub href: Option<String>,
    pub icon_src: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApp {
    pub app_id: String,
    pub name: String,
    pub brief: Option<String>,
    pub install_count: i64,
    pub href: Option<String>,
    pub icon_src: Option<String>,
}

/// Cached GitHub statistics for one app
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CachedStats {
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
    /// JSON array of topic strings, stored verbatim
    pub topics: String,
    pub repo_updated_at: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedStats {
    /// Topics decoded from their stored JSON form
    pub fn topics_vec(&self) -> Vec<String> {
        serde_json::from_str(&self.topics).unwrap_or_default()
    }
}

/// Cache occupancy summary
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CacheSummary {
    pub entries: i64,
    pub oldest_fetch: Option<DateTime<Utc>>,
    pub newest_fetch: Option<DateTime<Utc>>,
}

/// Aggregate catalog/cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_apps: i64,
    pub cached_entries: i64,
    pub starred_over_100: i64,
    pub starred_over_1000: i64,
}
