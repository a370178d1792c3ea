use lazycat_stars::github::parse_github_url;
use lazycat_stars::resolver;
use serde_json::{json, Value};

fn load(fixture: &str) -> Value {
    serde_json::from_str(fixture).expect("fixture is valid JSON")
}

#[test]
fn test_resolve_realistic_metadata_with_source_field() {
    let metadata = load(include_str!("fixtures/app_with_source_field.json"));

    let repo = resolver::resolve(&metadata).expect("should resolve");
    assert_eq!(repo.owner, "acme");
    assert_eq!(repo.repo, "widget");
    assert_eq!(repo.canonical_url(), "https://github.com/acme/widget");
}

#[test]
fn test_resolve_realistic_metadata_with_description_link() {
    let metadata = load(include_str!("fixtures/app_with_description_link.json"));

    let repo = resolver::resolve(&metadata).expect("should resolve from description");
    assert_eq!(repo.owner, "acme");
    assert_eq!(repo.repo, "notes");
}

#[test]
fn test_resolve_realistic_metadata_without_repository() {
    let metadata = load(include_str!("fixtures/app_without_repo.json"));

    assert!(resolver::resolve(&metadata).is_none());
}

#[test]
fn test_messy_url_variants_resolve_identically() {
    let variants = [
        "https://github.com/acme/widget",
        "https://github.com/acme/widget.git",
        "https://github.com/acme/widget/blob/main/README.md",
        "github.com/acme/widget/issues/4",
    ];

    for variant in variants {
        let metadata = json!({ "sourceCode": variant });
        let repo = resolver::resolve(&metadata)
            .unwrap_or_else(|| panic!("variant should resolve: {variant}"));
        assert_eq!(repo.owner, "acme", "owner mismatch for {variant}");
        assert_eq!(repo.repo, "widget", "repo mismatch for {variant}");
    }
}

#[test]
fn test_known_field_wins_over_description_and_deep_fields() {
    // All three strategies could match; the known-field scan must win
    let metadata = json!({
        "repository": "https://github.com/linkfield/winner",
        "description": "mirror at github.com/desctext/loser",
        "extra": { "link": "https://github.com/deepscan/loser" }
    });

    let repo = resolver::resolve(&metadata).unwrap();
    assert_eq!(repo.owner, "linkfield");
}

#[test]
fn test_description_wins_over_deep_scan() {
    let metadata = json!({
        "description": "source: github.com/desctext/winner",
        "extra": { "link": "https://github.com/deepscan/loser" }
    });

    let repo = resolver::resolve(&metadata).unwrap();
    assert_eq!(repo.owner, "desctext");
}

#[test]
fn test_no_github_link_anywhere_is_not_found() {
    let metadata = json!({
        "name": "app",
        "webSite": "https://example.com",
        "nested": {
            "a": { "b": { "c": "https://gitlab.com/acme/widget" } }
        }
    });

    assert!(resolver::resolve(&metadata).is_none());
}

#[test]
fn test_parse_github_url_rejects_bare_host() {
    assert!(parse_github_url("https://github.com").is_none());
    assert!(parse_github_url("https://github.com/").is_none());
}

#[test]
fn test_resolution_is_pure() {
    let metadata = load(include_str!("fixtures/app_with_source_field.json"));

    let first = resolver::resolve(&metadata);
    let second = resolver::resolve(&metadata);
    assert_eq!(first, second);
}
