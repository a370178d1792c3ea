use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};
use chrono::Utc;

/// Sort orders accepted by catalog search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppSort {
    /// Install count, most popular first
    #[default]
    Count,
    /// Name, ascending
    Name,
    /// Most recently added first
    Recent,
}

impl AppSort {
    pub fn parse(s: &str) -> Self {
        match s {
            "name" => AppSort::Name,
            "recent" => AppSort::Recent,
            _ => AppSort::Count,
        }
    }

    fn order_clause(self) -> &'static str {
        match self {
            AppSort::Count => "install_count DESC",
            AppSort::Name => "name ASC",
            AppSort::Recent => "created_at DESC",
        }
    }
}

/// Insert a new catalog entry
pub async fn create_app(pool: &DbPool, new_app: &NewApp) -> Result<App> {
    let now = Utc::now();

    let app = sqlx::query_as::<_, App>(
        r#"
        INSERT INTO apps (app_id, name, brief, install_count, href, icon_src, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new_app.app_id)
    .bind(&new_app.name)
    .bind(&new_app.brief)
    .bind(new_app.install_count)
    .bind(&new_app.href)
    .bind(&new_app.icon_src)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(app)
}

/// Get a catalog entry by its store app id
pub async fn get_app(pool: &DbPool, app_id: &str) -> Result<App> {
    let app = sqlx::query_as::<_, App>("SELECT * FROM apps WHERE app_id = ?")
        .bind(app_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("app {app_id} not in catalog")))?;

    Ok(app)
}

/// Delete a catalog entry. Returns true if a row was removed.
pub async fn delete_app(pool: &DbPool, app_id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM apps WHERE app_id = ?")
        .bind(app_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Paged LIKE search over the catalog. An empty query lists everything.
/// Returns the page of apps plus the total match count.
pub async fn search_apps(
    pool: &DbPool,
    query: &str,
    limit: i64,
    offset: i64,
    sort: AppSort,
) -> Result<(Vec<App>, i64)> {
    let pattern = format!("%{}%", query.trim());

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM apps WHERE name LIKE ? OR brief LIKE ?")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    // Sort order comes from a fixed enum, never from user input
    let sql = format!(
        "SELECT * FROM apps WHERE name LIKE ? OR brief LIKE ? ORDER BY {} LIMIT ? OFFSET ?",
        sort.order_clause()
    );

    let apps = sqlx::query_as::<_, App>(&sql)
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok((apps, total))
}

/// Aggregate statistics over the catalog and the stats cache
pub async fn get_statistics(pool: &DbPool) -> Result<CatalogStats> {
    let total_apps: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM apps")
        .fetch_one(pool)
        .await?;

    let cached_entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM github_stats_cache")
        .fetch_one(pool)
        .await?;

    let starred_over_100: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM github_stats_cache WHERE stars >= 100")
            .fetch_one(pool)
            .await?;

    let starred_over_1000: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM github_stats_cache WHERE stars >= 1000")
            .fetch_one(pool)
            .await?;

    Ok(CatalogStats {
        total_apps,
        cached_entries,
        starred_over_100,
        starred_over_1000,
    })
}
