use crate::appstore::MetarepoClient;
use crate::config::MetarepoConfig;
use crate::db::{self, models::CachedStats, DbPool};
use crate::github::{models::RateLimitWindow, GitHubClient, GitHubConfig};
use crate::resolver;
use crate::utils::similarity::similarity;
use crate::utils::template::render_copy_template;
use crate::{Error, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Names match a catalog entry at or above this similarity
const MATCH_THRESHOLD: f64 = 0.7;

/// How many catalog candidates to score per checked name
const MATCH_CANDIDATES: i64 = 5;

/// Orchestrates one lookup: metadata fetch, repository resolution, GitHub
/// fetch, cache write-through.
#[derive(Clone)]
pub struct StatsService {
    metarepo: Arc<MetarepoClient>,
    github: GitHubClient,
    pool: DbPool,
    copy_template: String,
}

/// Outcome of one refresh sweep
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub refreshed: usize,
    pub failed: usize,
}

/// Best catalog match for one checked name
#[derive(Debug, Clone, Serialize)]
pub struct BatchCheckMatch {
    pub app_id: String,
    pub name: String,
    pub install_count: i64,
}

/// Result for one name in a batch check
#[derive(Debug, Clone, Serialize)]
pub struct BatchCheckResult {
    pub input_name: String,
    pub exists: bool,
    pub similarity: f64,
    pub matched: Option<BatchCheckMatch>,
}

/// Whole-batch summary
#[derive(Debug, Clone, Serialize)]
pub struct BatchCheckReport {
    pub results: Vec<BatchCheckResult>,
    pub checked: usize,
    pub found: usize,
    pub missing: usize,
}

impl StatsService {
    pub fn new(
        metarepo_config: &MetarepoConfig,
        github_config: GitHubConfig,
        pool: DbPool,
        copy_template: String,
    ) -> Result<Self> {
        let metarepo = MetarepoClient::new(
            metarepo_config.base_url.clone(),
            metarepo_config.user_agent.clone(),
        )?;
        let github = GitHubClient::new(github_config)?;

        Ok(Self {
            metarepo: Arc::new(metarepo),
            github,
            pool,
            copy_template,
        })
    }

    /// Look up GitHub statistics for an app.
    ///
    /// Reads through the cache unless `refresh` is set. On a miss: fetch
    /// metadata, resolve the repository, fetch its statistics, write the
    /// result back. Both fetches are single-shot; either failure aborts the
    /// lookup with no partial result.
    pub async fn lookup(&self, app_id: &str, refresh: bool) -> Result<CachedStats> {
        if !refresh {
            if let Some(cached) = db::cache::get_stats(&self.pool, app_id).await? {
                debug!("Cache hit for {}", app_id);
                return Ok(cached);
            }
        }

        let metadata = self.metarepo.fetch_metadata(app_id).await?;

        let Some(repo_ref) = resolver::resolve(&metadata) else {
            // Normal outcome for apps without a public repository
            return Err(Error::NotFound(format!(
                "app {app_id} has no associated GitHub repository"
            )));
        };
        info!("Resolved {} -> {}", app_id, repo_ref);

        let repository = self
            .github
            .get_repository(&repo_ref.owner, &repo_ref.repo)
            .await?;

        let stats = CachedStats {
            app_id: app_id.to_string(),
            github_url: repo_ref.canonical_url(),
            owner: repo_ref.owner,
            repo: repo_ref.repo,
            stars: repository.stargazers_count,
            forks: repository.forks_count,
            watchers: repository.watchers_count,
            open_issues: repository.open_issues_count,
            language: repository.language,
            description: repository.description,
            topics: serde_json::to_string(&repository.topics)
                .unwrap_or_else(|_| "[]".to_string()),
            repo_updated_at: Some(repository.updated_at),
            fetched_at: Utc::now(),
        };

        db::cache::upsert_stats(&self.pool, &stats).await?;

        Ok(stats)
    }

    /// Clipboard text for an app, rendered from the configured template
    pub async fn copy_text(&self, app_id: &str) -> Result<String> {
        let stats = self.lookup(app_id, false).await?;
        Ok(render_copy_template(&self.copy_template, &stats.github_url))
    }

    /// Re-fetch statistics for every cached app with bounded concurrency.
    /// Individual failures are logged and counted, never abort the sweep.
    pub async fn refresh_all(&self, concurrency: usize) -> Result<RefreshReport> {
        let app_ids = db::cache::list_app_ids(&self.pool).await?;
        let total = app_ids.len();

        info!(
            "Refreshing {} cached entries with concurrency {}",
            total, concurrency
        );

        let results: Vec<_> = stream::iter(app_ids)
            .map(|app_id| {
                let service = self.clone();
                async move {
                    let outcome = service.lookup(&app_id, true).await;
                    (app_id, outcome)
                }
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut refreshed = 0;
        let mut failed = 0;

        for (app_id, outcome) in results {
            match outcome {
                Ok(_) => refreshed += 1,
                Err(e) => {
                    failed += 1;
                    warn!("Failed to refresh {}: {}", app_id, e);
                }
            }
        }

        info!("Refresh sweep done: {} ok, {} failed", refreshed, failed);

        Ok(RefreshReport { refreshed, failed })
    }

    /// Check a pasted list of app names against the catalog.
    ///
    /// Each name is fuzzy-matched against its closest catalog entries; a
    /// name counts as present when the best match scores at or above the
    /// threshold. Purely a database operation.
    pub async fn batch_check(&self, names: &[String]) -> Result<BatchCheckReport> {
        let mut results = Vec::with_capacity(names.len());
        let mut found = 0;

        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let (candidates, _) = db::apps::search_apps(
                &self.pool,
                name,
                MATCH_CANDIDATES,
                0,
                db::apps::AppSort::Count,
            )
            .await?;

            let mut best: Option<(f64, BatchCheckMatch)> = None;
            for candidate in candidates {
                let score = similarity(name, &candidate.name);
                if best.as_ref().map_or(true, |(s, _)| score > *s) {
                    best = Some((
                        score,
                        BatchCheckMatch {
                            app_id: candidate.app_id,
                            name: candidate.name,
                            install_count: candidate.install_count,
                        },
                    ));
                }
            }

            let (best_similarity, matched) = match best {
                Some((score, m)) => (score, Some(m)),
                None => (0.0, None),
            };
            let exists = best_similarity >= MATCH_THRESHOLD;
            if exists {
                found += 1;
            }

            results.push(BatchCheckResult {
                input_name: name.to_string(),
                exists,
                similarity: best_similarity,
                matched,
            });
        }

        let checked = results.len();
        Ok(BatchCheckReport {
            results,
            checked,
            found,
            missing: checked - found,
        })
    }

    /// Current GitHub API quota, for the settings panel
    pub async fn rate_limit(&self) -> Result<RateLimitWindow> {
        self.github.get_rate_limit().await
    }
}
