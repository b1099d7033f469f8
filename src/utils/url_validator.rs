//! Destination URL validation.
//!
//! URLs are checked, not rewritten: the stored destination is exactly the
//! string the client sent.

use url::Url;

/// Reasons a destination URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("url is required")]
    Missing,

    #[error("invalid URL")]
    Invalid,
}

/// Validates a destination URL.
///
/// # Rules
///
/// 1. Missing or empty input is rejected as [`UrlValidationError::Missing`]
/// 2. The input must parse as an absolute URL
/// 3. The scheme must be `http` or `https`
///
/// # Errors
///
/// Returns [`UrlValidationError::Invalid`] for unparseable input or any other
/// scheme (`javascript:`, `ftp:`, `data:` ...).
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url(Some("https://example.com")).is_ok());
/// assert_eq!(validate_url(Some("")), Err(UrlValidationError::Missing));
/// assert_eq!(validate_url(Some("not-a-url")), Err(UrlValidationError::Invalid));
/// ```
pub fn validate_url(raw: Option<&str>) -> Result<&str, UrlValidationError> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Err(UrlValidationError::Missing),
    };

    let parsed = Url::parse(raw).map_err(|_| UrlValidationError::Invalid)?;

    match parsed.scheme() {
        "http" | "https" => Ok(raw),
        _ => Err(UrlValidationError::Invalid),
    }
}
