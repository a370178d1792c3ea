/// Placeholder substituted with the canonical repository URL
pub const GITHUB_URL_PLACEHOLDER: &str = "{github_url}";

/// Default clipboard template when the user has not configured one
pub const DEFAULT_COPY_TEMPLATE: &str = "GitHub: {github_url}\n\n\
Write a hands-on introduction to this project. Focus on practical usage, \
keep the tone casual enough for a first-time user, and format the result \
as markdown.";

/// Render a clipboard template, substituting every `{github_url}` occurrence
pub fn render_copy_template(template: &str, github_url: &str) -> String {
    template.replace(GITHUB_URL_PLACEHOLDER, github_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholder() {
        let out = render_copy_template("source: {github_url}", "https://github.com/acme/widget");
        assert_eq!(out, "source: https://github.com/acme/widget");
    }

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let out = render_copy_template("{github_url} and again {github_url}", "u");
        assert_eq!(out, "u and again u");
    }

    #[test]
    fn test_render_without_placeholder_is_identity() {
        let out = render_copy_template("no placeholder here", "u");
        assert_eq!(out, "no placeholder here");
    }

    #[test]
    fn test_default_template_carries_placeholder() {
        assert!(DEFAULT_COPY_TEMPLATE.contains(GITHUB_URL_PLACEHOLDER));
    }
}
