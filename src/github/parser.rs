use regex::Regex;

/// A GitHub repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Canonical browser URL for the repository
    pub fn canonical_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Extract an owner/repo pair from a candidate GitHub URL.
///
/// Accepts the messy forms found in catalog metadata:
/// - https://github.com/owner/repo
/// - https://github.com/owner/repo.git
/// - https://github.com/owner/repo/blob/main/README.md
/// - github.com/owner/repo/issues/4
/// - free text with a github.com link embedded somewhere
///
/// Returns `None` when no repository URL can be recognized; malformed
/// candidates are a normal outcome, not an error.
pub fn parse_github_url(url: &str) -> Option<RepoRef> {
    if url.is_empty() {
        return None;
    }

    // Reduce to the repository part, dropping /blob/, /tree/, /issues/ and
    // any other path suffix after owner/repo
    let repo_url_re = Regex::new(r"(?i)(https?://)?github\.com/([^/]+)/([^/\s?#]+)").unwrap();
    let caps = repo_url_re.captures(url)?;
    let clean_url = format!("https://github.com/{}/{}", &caps[2], &caps[3]);

    let patterns = [
        Regex::new(r"(?i)github\.com/([^/]+)/([^/\s?#]+)").unwrap(),
        Regex::new(r"(?i)github\.com/([^/]+)/([^/\s?#]+)\.git").unwrap(),
    ];

    for pattern in &patterns {
        if let Some(m) = pattern.captures(&clean_url) {
            // Strip the .git suffix and any residual path fragment
            let repo = m[2].trim_end_matches(".git");
            let repo = repo.split('/').next().unwrap_or(repo);

            if repo.is_empty() {
                continue;
            }

            return Some(RepoRef {
                owner: m[1].to_string(),
                repo: repo.to_string(),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_https_url() {
        let info = parse_github_url("https://github.com/acme/widget").unwrap();
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widget");
    }

    #[test]
    fn test_parse_url_with_git_suffix() {
        let info = parse_github_url("https://github.com/acme/widget.git").unwrap();
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widget");
    }

    #[test]
    fn test_parse_url_with_blob_path() {
        let info = parse_github_url("https://github.com/acme/widget/blob/main/README.md").unwrap();
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widget");
    }

    #[test]
    fn test_parse_without_protocol() {
        let info = parse_github_url("github.com/acme/widget/issues/4").unwrap();
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widget");
    }

    #[test]
    fn test_parse_with_query_string() {
        let info = parse_github_url("https://github.com/acme/widget?tab=readme").unwrap();
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widget");
    }

    #[test]
    fn test_parse_embedded_in_text() {
        let info = parse_github_url("source lives at https://github.com/acme/widget, enjoy")
            .unwrap();
        assert_eq!(info.owner, "acme");
        // Trailing punctuation is not a path or query separator, it stays in
        // the candidate segment
        assert_eq!(info.repo, "widget,");
    }

    #[test]
    fn test_parse_case_insensitive_host() {
        let info = parse_github_url("HTTPS://GitHub.COM/acme/widget").unwrap();
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widget");
    }

    #[test]
    fn test_parse_rejects_non_github() {
        assert!(parse_github_url("https://gitlab.com/acme/widget").is_none());
    }

    #[test]
    fn test_parse_rejects_owner_only() {
        assert!(parse_github_url("https://github.com/acme").is_none());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_github_url("").is_none());
    }

    #[test]
    fn test_canonical_url() {
        let info = parse_github_url("github.com/acme/widget.git").unwrap();
        assert_eq!(info.canonical_url(), "https://github.com/acme/widget");
    }
}
