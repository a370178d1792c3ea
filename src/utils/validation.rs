// Validation utilities
use crate::error::{Error, Result};
use url::Url;

const MAX_APP_ID_LEN: usize = 128;

/// Validate a store app id before it is spliced into a request path.
/// Ids are opaque store identifiers; anything path- or whitespace-like is
/// rejected.
pub fn validate_app_id(app_id: &str) -> Result<()> {
    if app_id.is_empty() {
        return Err(Error::Validation("app id cannot be empty".to_string()));
    }

    if app_id.len() > MAX_APP_ID_LEN {
        return Err(Error::Validation(format!(
            "app id too long ({} chars, max {MAX_APP_ID_LEN})",
            app_id.len()
        )));
    }

    if app_id
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(Error::Validation(format!("invalid app id: {app_id}")));
    }

    Ok(())
}

/// Validate a configured service base URL: absolute, http(s), with a host
pub fn validate_base_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(Error::Validation(format!(
                "URL must use http or https scheme: {url_str}"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(Error::Validation(
            "URL must have a valid host".to_string(),
        ));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_app_id() {
        assert!(validate_app_id("cloud.lazycat.app.haven").is_ok());
        assert!(validate_app_id("app-123_x").is_ok());
    }

    #[test]
    fn test_invalid_app_ids() {
        assert!(validate_app_id("").is_err());
        assert!(validate_app_id("a/b").is_err());
        assert!(validate_app_id("a\\b").is_err());
        assert!(validate_app_id("has space").is_err());
        assert!(validate_app_id(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_valid_base_url() {
        assert!(validate_base_url("https://dl.lazycat.cloud/appstore/metarepo/zh/v3").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
    }

    #[test]
    fn test_invalid_base_urls() {
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("file:///etc/passwd").is_err());
    }
}
