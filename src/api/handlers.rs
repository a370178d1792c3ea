use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::{api::models::*, db, service::BatchCheckReport, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub service: crate::service::StatsService,
    pub settings: crate::config::Settings,
}

/// GET /api/apps - Search the catalog
pub async fn search_apps(
    State(state): State<AppState>,
    Query(params): Query<AppsParams>,
) -> Result<Json<AppsResponse>> {
    debug!("Catalog search request: {:?}", params);

    let limit = params
        .limit
        .min(state.settings.pagination.api_max_limit)
        .max(1);
    let page = params.page.max(1);
    let offset = (page - 1) * limit;
    let sort = db::apps::AppSort::parse(&params.sort);

    let (apps, total) =
        db::apps::search_apps(&state.pool, &params.q, limit as i64, offset as i64, sort).await?;

    Ok(Json(AppsResponse {
        results: apps.into_iter().map(AppCard::from).collect(),
        pagination: Pagination {
            page,
            limit,
            total: total as usize,
            total_pages: (total as usize).div_ceil(limit),
        },
    }))
}

/// GET /api/apps/:app_id - Catalog entry with any cached statistics
pub async fn get_app(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<AppDetail>> {
    let app = db::apps::get_app(&state.pool, &app_id).await?;
    let cached = db::cache::get_stats(&state.pool, &app_id).await?;

    Ok(Json(AppDetail {
        app: AppCard::from(app),
        stats: cached.map(StatsResponse::from),
    }))
}

/// POST /api/apps - Add a catalog entry
pub async fn create_app(
    State(state): State<AppState>,
    Json(request): Json<CreateAppRequest>,
) -> Result<Json<AppCard>> {
    crate::utils::validation::validate_app_id(&request.app_id)?;
    if request.name.trim().is_empty() {
        return Err(crate::Error::Validation(
            "app name cannot be empty".to_string(),
        ));
    }

    let app = db::apps::create_app(
        &state.pool,
        &db::models::NewApp {
            app_id: request.app_id,
            name: request.name.trim().to_string(),
            brief: request.brief,
            install_count: request.install_count,
            href: request.href,
            icon_src: request.icon_src,
        },
    )
    .await?;

    Ok(Json(AppCard::from(app)))
}

/// DELETE /api/apps/:app_id - Remove a catalog entry
pub async fn delete_app(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted = db::apps::delete_app(&state.pool, &app_id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// GET /api/apps/:app_id/stats - GitHub statistics, read-through cached
pub async fn get_app_stats(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Query(params): Query<StatsParams>,
) -> Result<Json<StatsResponse>> {
    debug!("Stats request for {} (refresh: {})", app_id, params.refresh);

    let stats = state.service.lookup(&app_id, params.refresh).await?;
    Ok(Json(StatsResponse::from(stats)))
}

/// GET /api/apps/:app_id/copy-text - Rendered clipboard template
pub async fn get_copy_text(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<CopyTextResponse>> {
    let text = state.service.copy_text(&app_id).await?;
    Ok(Json(CopyTextResponse { text }))
}

/// DELETE /api/apps/:app_id/stats - Evict one cache entry
pub async fn evict_app_stats(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<EvictResponse>> {
    let evicted = db::cache::delete_stats(&state.pool, &app_id).await?;
    Ok(Json(EvictResponse { evicted }))
}

/// DELETE /api/cache - Clear the whole cache
pub async fn clear_cache(State(state): State<AppState>) -> Result<Json<ClearCacheResponse>> {
    let evicted = db::cache::clear(&state.pool).await?;
    Ok(Json(ClearCacheResponse { evicted }))
}

/// GET /api/cache - Cache occupancy summary
pub async fn get_cache_summary(
    State(state): State<AppState>,
) -> Result<Json<db::models::CacheSummary>> {
    let summary = db::cache::summary(&state.pool).await?;
    Ok(Json(summary))
}

/// POST /api/batch-check - Check a list of app names against the catalog
pub async fn batch_check(
    State(state): State<AppState>,
    Json(request): Json<BatchCheckRequest>,
) -> Result<Json<BatchCheckReport>> {
    debug!("Batch check of {} names", request.apps.len());

    let report = state.service.batch_check(&request.apps).await?;
    Ok(Json(report))
}

/// GET /api/stats - Aggregate catalog/cache statistics
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<db::models::CatalogStats>> {
    let stats = db::apps::get_statistics(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/rate-limit - GitHub API quota passthrough
pub async fn get_rate_limit(State(state): State<AppState>) -> Result<Json<RateLimitResponse>> {
    let window = state.service.rate_limit().await?;

    Ok(Json(RateLimitResponse {
        limit: window.limit,
        remaining: window.remaining,
        reset_at: chrono::DateTime::from_timestamp(window.reset, 0).unwrap_or_else(chrono::Utc::now),
    }))
}

/// GET /health - Liveness check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    // Check database connectivity
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok();

    Ok(Json(ReadinessResponse {
        ready: db_healthy,
        database: if db_healthy { "ok" } else { "error" }.to_string(),
    }))
}
