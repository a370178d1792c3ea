use clap::Parser;
use lazycat_stars::{
    api::{handlers::AppState, routes},
    cli::{commands, Cli, Commands},
    config::Settings,
    db,
    github::GitHubConfig,
    service::StatsService,
    Error, Result,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lazycat_stars=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Check { app_id, refresh } => {
            let service = init_service(&settings).await?;
            commands::check(&service, &app_id, refresh).await?;
        }
        Commands::Search { query, page, limit } => {
            let server_url = settings.server.external_url.clone().unwrap_or_else(|| {
                format!("http://{}:{}", settings.server.host, settings.server.port)
            });
            commands::search(&server_url, &query, page, limit).await?;
        }
        Commands::BatchCheck { file } => {
            let service = init_service(&settings).await?;
            commands::batch_check(&service, &file).await?;
        }
        Commands::RefreshAll { concurrency } => {
            let service = init_service(&settings).await?;
            commands::refresh_all(&service, concurrency).await?;
        }
        Commands::ClearCache { app_id } => {
            let pool = init_db(&settings).await?;
            commands::clear_cache(&pool, app_id).await?;
        }
        Commands::RateLimit => {
            let service = init_service(&settings).await?;
            commands::rate_limit(&service).await?;
        }
        Commands::Migrate => {
            migrate(settings).await?;
        }
    }

    Ok(())
}

async fn init_db(settings: &Settings) -> Result<db::DbPool> {
    let pool = db::init_pool(&settings.database.url).await?;
    db::run_migrations(&pool).await?;
    Ok(pool)
}

async fn init_service(settings: &Settings) -> Result<StatsService> {
    let pool = init_db(settings).await?;
    let github_config = GitHubConfig::from_env();

    if github_config.has_token() {
        info!("Using configured GitHub token");
    } else {
        info!("No GitHub token configured, using unauthenticated rate limits");
    }

    StatsService::new(
        &settings.metarepo,
        github_config,
        pool,
        settings.clipboard.copy_template.clone(),
    )
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting lazycat-stars server");
    info!("Database: {}", settings.database.url);
    info!("Metarepo: {}", settings.metarepo.base_url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Initialize database with connection pooling configuration
    let pool = db::init_pool_with_config(&settings.database).await?;
    info!(
        "Database connection established (max_connections: {}, min_connections: {})",
        settings.database.max_connections, settings.database.min_connections
    );

    // Run migrations
    db::run_migrations(&pool).await?;
    info!("Database migrations completed");

    // Initialize the lookup service
    let github_config = GitHubConfig::from_env();
    if github_config.has_token() {
        info!("GitHub token configured");
    } else {
        info!("No GitHub token configured, using unauthenticated rate limits");
    }

    let service = StatsService::new(
        &settings.metarepo,
        github_config,
        pool.clone(),
        settings.clipboard.copy_template.clone(),
    )?;

    // Create application state
    let state = AppState {
        pool,
        service,
        settings: settings.clone(),
    };

    // Create router with rate limiting
    let app = routes::create_router(state, &settings);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("lazycat-stars");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("Database: Connected");
    println!("\nAPI Endpoints:");
    println!("  GET    /api/apps");
    println!("  POST   /api/apps");
    println!("  GET    /api/apps/:app_id");
    println!("  DELETE /api/apps/:app_id");
    println!("  GET    /api/apps/:app_id/stats");
    println!("  GET    /api/apps/:app_id/copy-text");
    println!("  DELETE /api/apps/:app_id/stats");
    println!("  GET    /api/cache");
    println!("  DELETE /api/cache");
    println!("  POST   /api/batch-check");
    println!("  GET    /api/stats");
    println!("  GET    /api/rate-limit");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn migrate(settings: Settings) -> Result<()> {
    info!("Running database migrations");

    let pool = db::init_pool(&settings.database.url).await?;
    db::run_migrations(&pool).await?;

    println!("✓ Database migrations completed successfully");
    Ok(())
}
