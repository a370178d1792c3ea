//! Heuristic discovery of a GitHub repository in catalog metadata.
//!
//! The metarepo returns loosely-structured JSON with no schema guarantees:
//! the repository link may sit in any of a dozen conventional fields, be
//! buried in free-form description text, or hide in a nested object. The
//! resolver tries three strategies in order and returns the first hit:
//!
//! 1. a fixed list of known link fields (top-level and one level nested)
//! 2. a regex scan of the description-like text fields
//! 3. a bounded depth-first walk over the whole document
//!
//! Resolution is pure and synchronous; a metadata object that mentions no
//! GitHub repository yields `None`, never an error.

use crate::github::parser::{parse_github_url, RepoRef};
use regex::Regex;
use serde_json::Value;

/// Top-level fields conventionally holding a source-code link, in priority
/// order. Matches what catalog entries have been observed to use.
const LINK_FIELDS: [&str; 10] = [
    "sourceCode",
    "webSite",
    "repoUrl",
    "repository",
    "homepage",
    "url",
    "source",
    "git",
    "gitUrl",
    "repo",
];

/// One-level-nested fields checked after the top-level ones
const NESTED_LINK_FIELDS: [(&str, &str); 6] = [
    ("links", "github"),
    ("links", "source"),
    ("links", "repo"),
    ("project", "github"),
    ("project", "source"),
    ("project", "repo"),
];

/// Free-text fields scanned when no link field matched
const TEXT_FIELDS: [&str; 3] = ["description", "summary", "about"];

/// Nesting bound for the deep scan. Metadata documents are shallow in
/// practice; anything deeper is noise.
const MAX_SCAN_DEPTH: usize = 5;

/// Resolve the GitHub repository associated with a metadata document.
///
/// The strategies are strictly sequential: the text-field scan runs only
/// when no link field produced a parseable URL, and the deep scan only after
/// both failed. Within each scan the first candidate that parses wins.
pub fn resolve(metadata: &Value) -> Option<RepoRef> {
    scan_link_fields(metadata)
        .or_else(|| scan_text_fields(metadata))
        .or_else(|| deep_scan(metadata).as_deref().and_then(parse_github_url))
}

/// Known link fields, top-level then nested, in list order
fn scan_link_fields(metadata: &Value) -> Option<RepoRef> {
    let top_level = LINK_FIELDS.iter().map(|field| metadata.get(field));
    let nested = NESTED_LINK_FIELDS
        .iter()
        .map(|(outer, inner)| metadata.get(outer).and_then(|v| v.get(inner)));

    for candidate in top_level.chain(nested) {
        let Some(Value::String(s)) = candidate else {
            continue;
        };
        if !s.contains("github.com") {
            continue;
        }
        if let Some(repo) = parse_github_url(s) {
            return Some(repo);
        }
    }

    None
}

/// Pull a github.com link out of free-form description text
fn scan_text_fields(metadata: &Value) -> Option<RepoRef> {
    let link_re = Regex::new(r"(?i)github\.com/\S+").unwrap();

    for field in TEXT_FIELDS {
        let Some(Value::String(text)) = metadata.get(field) else {
            continue;
        };
        let Some(m) = link_re.find(text) else {
            continue;
        };
        if let Some(repo) = parse_github_url(&format!("https://{}", m.as_str())) {
            return Some(repo);
        }
    }

    None
}

/// Last resort: depth-first walk over every object field, document order.
///
/// Returns the first extractable URL and stops immediately; the caller
/// decides whether it parses. Arrays are not descended into, and objects
/// nested more than `MAX_SCAN_DEPTH` levels below the root are not visited.
fn deep_scan(metadata: &Value) -> Option<String> {
    let url_re = Regex::new(r"(?i)https?://github\.com/[^/\s]+/[^/\s?#]+").unwrap();
    walk(metadata, 0, &url_re)
}

fn walk(value: &Value, depth: usize, url_re: &Regex) -> Option<String> {
    if depth > MAX_SCAN_DEPTH {
        return None;
    }

    let Value::Object(map) = value else {
        return None;
    };

    for (key, field) in map {
        match field {
            Value::String(s) if s.contains("github.com") => {
                if let Some(m) = url_re.find(s) {
                    tracing::debug!("deep scan found URL in field {}: {}", key, m.as_str());
                    return Some(m.as_str().to_string());
                }
                if s.starts_with("github.com/") {
                    // Scheme-less link: keep everything up to the first
                    // whitespace or list separator
                    let trimmed = s
                        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
                        .next()
                        .unwrap_or(s);
                    tracing::debug!("deep scan found bare link in field {}: {}", key, trimmed);
                    return Some(format!("https://{trimmed}"));
                }
            }
            Value::Object(_) => {
                if let Some(found) = walk(field, depth + 1, url_re) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }

    None
}
