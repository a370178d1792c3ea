use crate::db::{self, DbPool};
use crate::service::StatsService;
use crate::{Error, Result};
use reqwest::Client;
use serde::Deserialize;

/// Search the catalog through a running server
pub async fn search(
    server_url: &str,
    query: &str,
    page: Option<usize>,
    limit: Option<usize>,
) -> Result<()> {
    let client = Client::new();

    // Build query params
    let mut url = format!("{}/api/apps?q={}", server_url, urlencoding::encode(query));

    if let Some(page) = page {
        url.push_str(&format!("&page={page}"));
    }

    if let Some(limit) = limit {
        url.push_str(&format!("&limit={limit}"));
    }

    // Make request
    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Http(response.error_for_status().unwrap_err()));
    }

    let results: AppsResponse = response.json().await?;

    if results.results.is_empty() {
        println!("No apps matched '{query}'");
        return Ok(());
    }

    println!(
        "Found {} apps (page {} of {}):\n",
        results.pagination.total, results.pagination.page, results.pagination.total_pages
    );

    for app in &results.results {
        println!("  {} [{}]", app.name, app.app_id);
        if let Some(brief) = &app.brief {
            println!("    {brief}");
        }
        println!("    installs: {}", app.install_count);
    }

    Ok(())
}

/// Look up GitHub statistics for one app and print them
pub async fn check(service: &StatsService, app_id: &str, refresh: bool) -> Result<()> {
    let stats = service.lookup(app_id, refresh).await?;

    println!("✓ {}", stats.github_url);
    println!("  stars: {}", stats.stars);
    println!("  forks: {}", stats.forks);
    println!("  open issues: {}", stats.open_issues);
    if let Some(language) = &stats.language {
        println!("  language: {language}");
    }
    if let Some(description) = &stats.description {
        println!("  {description}");
    }
    let topics = stats.topics_vec();
    if !topics.is_empty() {
        println!("  topics: {}", topics.join(", "));
    }
    println!("  fetched at: {}", stats.fetched_at.to_rfc3339());

    Ok(())
}

/// Check a newline-separated file of app names against the catalog
pub async fn batch_check(service: &StatsService, file: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if names.is_empty() {
        return Err(Error::Validation(format!("no app names found in {file}")));
    }

    let report = service.batch_check(&names).await?;

    for result in &report.results {
        if result.exists {
            let matched = result
                .matched
                .as_ref()
                .map(|m| m.name.as_str())
                .unwrap_or("?");
            println!(
                "✓ {} -> {} (similarity {:.2})",
                result.input_name, matched, result.similarity
            );
        } else {
            println!("✗ {} (best similarity {:.2})", result.input_name, result.similarity);
        }
    }

    println!(
        "\n{} checked, {} found, {} missing",
        report.checked, report.found, report.missing
    );

    Ok(())
}

/// Re-fetch statistics for every cached app
pub async fn refresh_all(service: &StatsService, concurrency: usize) -> Result<()> {
    let report = service.refresh_all(concurrency).await?;
    println!("✓ {} refreshed, {} failed", report.refreshed, report.failed);
    Ok(())
}

/// Evict cached statistics
pub async fn clear_cache(pool: &DbPool, app_id: Option<String>) -> Result<()> {
    match app_id {
        Some(app_id) => {
            if db::cache::delete_stats(pool, &app_id).await? {
                println!("✓ Evicted cached stats for {app_id}");
            } else {
                println!("Nothing cached for {app_id}");
            }
        }
        None => {
            let evicted = db::cache::clear(pool).await?;
            println!("✓ Cleared {evicted} cached entries");
        }
    }

    Ok(())
}

/// Show the current GitHub API quota
pub async fn rate_limit(service: &StatsService) -> Result<()> {
    let window = service.rate_limit().await?;
    let reset = chrono::DateTime::from_timestamp(window.reset, 0)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!(
        "{}/{} requests remaining, resets at {}",
        window.remaining, window.limit, reset
    );

    if window.limit <= 60 {
        println!("No token configured; set GITHUB_TOKEN for a higher limit");
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct AppsResponse {
    results: Vec<AppCard>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct AppCard {
    app_id: String,
    name: String,
    brief: Option<String>,
    install_count: i64,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    page: usize,
    total: usize,
    total_pages: usize,
}
