//! Validation of submitted long URLs.
//!
//! URLs are stored exactly as submitted so that redirects return the same
//! string; this module only decides whether a string is acceptable.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Missing,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL contains control characters")]
    ControlCharacters,
}

/// Checks that `input` can be stored and later sent back as a redirect target.
///
/// # Rules
///
/// 1. Must not be blank
/// 2. Must not contain control characters (it ends up in a `Location` header)
/// 3. Must parse as an absolute URL
///
/// Any scheme is accepted.
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] rule that fails.
///
/// # Examples
///
/// ```
/// use magcargo::utils::url_validator::validate_url;
///
/// assert!(validate_url("http://example.com").is_ok());
/// assert!(validate_url("ftp://example.com/file").is_ok());
/// assert!(validate_url("example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Missing);
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacters);
    }

    Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    Ok(())
}
