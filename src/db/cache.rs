use crate::db::{models::*, DbPool};
use crate::error::Result;

/// Look up the cached statistics for an app
pub async fn get_stats(pool: &DbPool, app_id: &str) -> Result<Option<CachedStats>> {
    let stats =
        sqlx::query_as::<_, CachedStats>("SELECT * FROM github_stats_cache WHERE app_id = ?")
            .bind(app_id)
            .fetch_optional(pool)
            .await?;

    Ok(stats)
}

/// Write-through: insert or replace the cache row for an app
pub async fn upsert_stats(pool: &DbPool, stats: &CachedStats) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO github_stats_cache
            (app_id, github_url, owner, repo, stars, forks, watchers, open_issues,
             language, description, topics, repo_updated_at, fetched_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(app_id) DO UPDATE SET
            github_url = excluded.github_url,
            owner = excluded.owner,
            repo = excluded.repo,
            stars = excluded.stars,
            forks = excluded.forks,
            watchers = excluded.watchers,
            open_issues = excluded.open_issues,
            language = excluded.language,
            description = excluded.description,
            topics = excluded.topics,
            repo_updated_at = excluded.repo_updated_at,
            fetched_at = excluded.fetched_at
        "#,
    )
    .bind(&stats.app_id)
    .bind(&stats.github_url)
    .bind(&stats.owner)
    .bind(&stats.repo)
    .bind(stats.stars)
    .bind(stats.forks)
    .bind(stats.watchers)
    .bind(stats.open_issues)
    .bind(&stats.language)
    .bind(&stats.description)
    .bind(&stats.topics)
    .bind(stats.repo_updated_at)
    .bind(stats.fetched_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Evict one entry. Returns true if a row was removed.
pub async fn delete_stats(pool: &DbPool, app_id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM github_stats_cache WHERE app_id = ?")
        .bind(app_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Evict everything. Returns the number of rows removed.
pub async fn clear(pool: &DbPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM github_stats_cache")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// All app ids currently cached, oldest fetch first
pub async fn list_app_ids(pool: &DbPool) -> Result<Vec<String>> {
    let ids: Vec<String> =
        sqlx::query_scalar("SELECT app_id FROM github_stats_cache ORDER BY fetched_at ASC")
            .fetch_all(pool)
            .await?;

    Ok(ids)
}

/// Occupancy summary for the options/cache panel
pub async fn summary(pool: &DbPool) -> Result<CacheSummary> {
    let summary = sqlx::query_as::<_, CacheSummary>(
        r#"
        SELECT
            COUNT(*) as entries,
            MIN(fetched_at) as oldest_fetch,
            MAX(fetched_at) as newest_fetch
        FROM github_stats_cache
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(summary)
}
