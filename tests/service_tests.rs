use lazycat_stars::config::{DatabaseConfig, MetarepoConfig};
use lazycat_stars::db::{self, models::NewApp, DbPool};
use lazycat_stars::github::GitHubConfig;
use lazycat_stars::service::StatsService;
use lazycat_stars::Error;

const REPO_BODY: &str = r#"{
    "id": 1,
    "name": "widget",
    "full_name": "acme/widget",
    "owner": { "login": "acme", "id": 1 },
    "html_url": "https://github.com/acme/widget",
    "description": "A widget",
    "stargazers_count": 4321,
    "forks_count": 210,
    "watchers_count": 4321,
    "open_issues_count": 17,
    "language": "Rust",
    "default_branch": "main",
    "topics": ["widgets"],
    "created_at": "2019-05-01T12:00:00Z",
    "updated_at": "2024-11-20T08:30:00Z",
    "archived": false
}"#;

async fn test_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connection_timeout_seconds: 5,
        idle_timeout_seconds: 600,
    };

    let pool = db::init_pool_with_config(&config).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

fn test_service(base_url: &str, pool: DbPool, copy_template: &str) -> StatsService {
    // Point both upstreams at the same mock server
    let metarepo_config = MetarepoConfig {
        base_url: base_url.to_string(),
        user_agent: "lazycat-stars-tests".to_string(),
    };
    let github_config = GitHubConfig {
        token: None,
        api_base_url: base_url.to_string(),
    };

    StatsService::new(&metarepo_config, github_config, pool, copy_template.to_string()).unwrap()
}

#[tokio::test]
async fn test_lookup_resolves_fetches_and_caches() {
    let mut server = mockito::Server::new_async().await;
    let metadata_mock = server
        .mock("GET", "/app_widget.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name":"Widget","sourceCode":"https://github.com/acme/widget"}"#)
        .expect(1)
        .create_async()
        .await;
    let repo_mock = server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPO_BODY)
        .expect(1)
        .create_async()
        .await;

    let pool = test_pool().await;
    let service = test_service(&server.url(), pool.clone(), "t");

    let stats = service.lookup("widget", false).await.unwrap();
    assert_eq!(stats.github_url, "https://github.com/acme/widget");
    assert_eq!(stats.stars, 4321);
    assert_eq!(stats.topics_vec(), vec!["widgets"]);

    // Second lookup is served from the cache; neither upstream is hit again
    let cached = service.lookup("widget", false).await.unwrap();
    assert_eq!(cached.stars, 4321);

    metadata_mock.assert_async().await;
    repo_mock.assert_async().await;

    assert!(db::cache::get_stats(&pool, "widget").await.unwrap().is_some());
}

#[tokio::test]
async fn test_lookup_refresh_bypasses_cache() {
    let mut server = mockito::Server::new_async().await;
    let metadata_mock = server
        .mock("GET", "/app_widget.json")
        .with_status(200)
        .with_body(r#"{"sourceCode":"https://github.com/acme/widget"}"#)
        .expect(2)
        .create_async()
        .await;
    let repo_mock = server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_body(REPO_BODY)
        .expect(2)
        .create_async()
        .await;

    let pool = test_pool().await;
    let service = test_service(&server.url(), pool, "t");

    service.lookup("widget", false).await.unwrap();
    service.lookup("widget", true).await.unwrap();

    metadata_mock.assert_async().await;
    repo_mock.assert_async().await;
}

#[tokio::test]
async fn test_lookup_without_repository_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/app_closed.json")
        .with_status(200)
        .with_body(r#"{"name":"Closed","webSite":"https://example.com"}"#)
        .create_async()
        .await;

    let pool = test_pool().await;
    let service = test_service(&server.url(), pool.clone(), "t");

    let err = service.lookup("closed", false).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    // A failed resolution never writes through
    assert!(db::cache::get_stats(&pool, "closed").await.unwrap().is_none());
}

#[tokio::test]
async fn test_lookup_metadata_error_surfaces_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/app_widget.json")
        .with_status(500)
        .create_async()
        .await;

    let pool = test_pool().await;
    let service = test_service(&server.url(), pool, "t");

    let err = service.lookup("widget", false).await.unwrap_err();
    match err {
        Error::Metadata(msg) => assert!(msg.contains("500"), "unexpected message: {msg}"),
        other => panic!("expected Metadata error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_lookup_github_failure_leaves_cache_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/app_widget.json")
        .with_status(200)
        .with_body(r#"{"sourceCode":"https://github.com/acme/widget"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/acme/widget")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;

    let pool = test_pool().await;
    let service = test_service(&server.url(), pool.clone(), "t");

    assert!(service.lookup("widget", false).await.is_err());
    assert!(db::cache::get_stats(&pool, "widget").await.unwrap().is_none());
}

#[tokio::test]
async fn test_copy_text_renders_template() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/app_widget.json")
        .with_status(200)
        .with_body(r#"{"sourceCode":"https://github.com/acme/widget"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_body(REPO_BODY)
        .create_async()
        .await;

    let pool = test_pool().await;
    let service = test_service(&server.url(), pool, "source: {github_url}");

    let text = service.copy_text("widget").await.unwrap();
    assert_eq!(text, "source: https://github.com/acme/widget");
}

#[tokio::test]
async fn test_batch_check_against_catalog() {
    let pool = test_pool().await;

    for (app_id, name, installs) in [
        ("a1", "Nextcloud", 900),
        ("a2", "Jellyfin", 1500),
        ("a3", "Home Assistant", 700),
    ] {
        db::apps::create_app(
            &pool,
            &NewApp {
                app_id: app_id.to_string(),
                name: name.to_string(),
                brief: None,
                install_count: installs,
                href: None,
                icon_src: None,
            },
        )
        .await
        .unwrap();
    }

    // No upstream traffic for batch checks; any URL works
    let service = test_service("http://127.0.0.1:1", pool, "t");

    let names = vec![
        "nextcloud".to_string(),
        "assistant".to_string(),
        "definitely-not-in-store".to_string(),
        "   ".to_string(),
    ];
    let report = service.batch_check(&names).await.unwrap();

    assert_eq!(report.checked, 3); // blank line skipped
    assert_eq!(report.found, 2);
    assert_eq!(report.missing, 1);

    assert!(report.results[0].exists);
    assert_eq!(report.results[0].similarity, 1.0);
    assert_eq!(report.results[0].matched.as_ref().unwrap().name, "Nextcloud");
    assert!(report.results[1].exists);
    assert_eq!(
        report.results[1].matched.as_ref().unwrap().name,
        "Home Assistant"
    );
    assert!(!report.results[2].exists);
}

#[tokio::test]
async fn test_refresh_all_counts_failures() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/app_good.json")
        .with_status(200)
        .with_body(r#"{"sourceCode":"https://github.com/acme/widget"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_body(REPO_BODY)
        .create_async()
        .await;
    server
        .mock("GET", "/app_bad.json")
        .with_status(500)
        .create_async()
        .await;

    let pool = test_pool().await;
    let service = test_service(&server.url(), pool.clone(), "t");

    // Seed two cached entries; one will fail its metadata refetch
    for app_id in ["good", "bad"] {
        db::cache::upsert_stats(
            &pool,
            &lazycat_stars::db::models::CachedStats {
                app_id: app_id.to_string(),
                github_url: "https://github.com/acme/widget".to_string(),
                owner: "acme".to_string(),
                repo: "widget".to_string(),
                stars: 0,
                forks: 0,
                watchers: 0,
                open_issues: 0,
                language: None,
                description: None,
                topics: "[]".to_string(),
                repo_updated_at: None,
                fetched_at: chrono::Utc::now(),
            },
        )
        .await
        .unwrap();
    }

    let report = service.refresh_all(2).await.unwrap();
    assert_eq!(report.refreshed, 1);
    assert_eq!(report.failed, 1);

    // The successful entry now carries fresh numbers
    let good = db::cache::get_stats(&pool, "good").await.unwrap().unwrap();
    assert_eq!(good.stars, 4321);
}
