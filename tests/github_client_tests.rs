use lazycat_stars::github::{GitHubClient, GitHubConfig};
use lazycat_stars::Error;

fn test_client(base_url: String) -> GitHubClient {
    GitHubClient::new(GitHubConfig {
        token: None,
        api_base_url: base_url,
    })
    .expect("client builds")
}

const REPO_BODY: &str = r#"{
    "id": 1296269,
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
    "topics": ["widgets", "self-hosted"],
    "created_at": "2019-05-01T12:00:00Z",
    "updated_at": "2024-11-20T08:30:00Z",
    "archived": false
}"#;

#[tokio::test]
async fn test_get_repository_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPO_BODY)
        .create_async()
        .await;

    let client = test_client(server.url());
    let repo = client.get_repository("acme", "widget").await.unwrap();

    assert_eq!(repo.full_name, "acme/widget");
    assert_eq!(repo.owner.login, "acme");
    assert_eq!(repo.stargazers_count, 4321);
    assert_eq!(repo.forks_count, 210);
    assert_eq!(repo.open_issues_count, 17);
    assert_eq!(repo.language.as_deref(), Some("Rust"));
    assert_eq!(repo.topics, vec!["widgets", "self-hosted"]);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_repository_missing_topics_defaults_empty() {
    let body = r#"{
        "id": 1,
        "name": "widget",
        "full_name": "acme/widget",
        "owner": { "login": "acme", "id": 1 },
        "html_url": "https://github.com/acme/widget",
        "description": null,
        "stargazers_count": 0,
        "forks_count": 0,
        "watchers_count": 0,
        "open_issues_count": 0,
        "language": null,
        "default_branch": "master",
        "created_at": "2019-05-01T12:00:00Z",
        "updated_at": "2024-11-20T08:30:00Z"
    }"#;

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = test_client(server.url());
    let repo = client.get_repository("acme", "widget").await.unwrap();

    assert!(repo.topics.is_empty());
    assert!(repo.language.is_none());
    assert!(!repo.archived);
}

#[tokio::test]
async fn test_forbidden_with_reset_header_reports_retry_time() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/acme/widget")
        .with_status(403)
        .with_header("x-ratelimit-remaining", "0")
        .with_header("x-ratelimit-reset", "1900000000")
        .with_body(r#"{"message":"API rate limit exceeded"}"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client.get_repository("acme", "widget").await.unwrap_err();

    match err {
        Error::RateLimited(msg) => {
            assert!(msg.contains("retry after"), "unexpected message: {msg}");
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_forbidden_without_reset_header() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/acme/widget")
        .with_status(403)
        .with_body(r#"{"message":"forbidden"}"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client.get_repository("acme", "widget").await.unwrap_err();

    match err {
        Error::RateLimited(msg) => {
            assert!(!msg.contains("retry after"), "unexpected message: {msg}");
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_maps_to_not_found_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/acme/gone")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client.get_repository("acme", "gone").await.unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_server_error_maps_to_github_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/acme/widget")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client.get_repository("acme", "widget").await.unwrap_err();

    match err {
        Error::GitHub(msg) => assert!(msg.contains("502"), "unexpected message: {msg}"),
        other => panic!("expected GitHub error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_rate_limit() {
    let body = r#"{
        "rate": { "limit": 5000, "remaining": 4987, "reset": 1900000000 }
    }"#;

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rate_limit")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = test_client(server.url());
    let window = client.get_rate_limit().await.unwrap();

    assert_eq!(window.limit, 5000);
    assert_eq!(window.remaining, 4987);
    assert_eq!(window.reset, 1900000000);
}
