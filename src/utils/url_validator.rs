//! Validation of long URLs submitted for shortening.
//!
//! Validation is a pure function so it can run before any store or cache
//! interaction, both from the request DTO and from the creation service.

use std::borrow::Cow;
use validator::ValidationError;

/// Maximum accepted length of a long URL, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

const ALLOWED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Reasons a long URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must start with http:// or https://")]
    UnsupportedScheme,

    #[error("URL is too long (max {max} characters, got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Checks that `url` starts with an explicit `http://` or `https://` marker and
/// is at most [`MAX_URL_LENGTH`] characters long.
///
/// The URL is otherwise stored exactly as submitted; deduplication compares
/// the raw string.
///
/// # Examples
///
/// ```
/// use url_redirector::utils::url_validator::validate_long_url;
///
/// assert!(validate_long_url("https://example.com").is_ok());
/// assert!(validate_long_url("ftp://example.com").is_err());
/// ```
pub fn validate_long_url(url: &str) -> Result<(), UrlValidationError> {
    if !ALLOWED_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        return Err(UrlValidationError::UnsupportedScheme);
    }

    let actual = url.chars().count();
    if actual > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong {
            max: MAX_URL_LENGTH,
            actual,
        });
    }

    Ok(())
}

/// Adapter for `#[validate(custom(function = ...))]` on request DTOs.
pub fn validate_long_url_field(url: &str) -> Result<(), ValidationError> {
    validate_long_url(url).map_err(|e| {
        let code = match e {
            UrlValidationError::UnsupportedScheme => "unsupported_scheme",
            UrlValidationError::TooLong { .. } => "too_long",
        };
        ValidationError::new(code).with_message(Cow::Owned(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_accepted() {
        assert!(validate_long_url("https://example.com").is_ok());
    }

    #[test]
    fn test_http_accepted() {
        assert!(validate_long_url("http://example.com/path?q=1#frag").is_ok());
    }

    #[test]
    fn test_missing_scheme_rejected() {
        assert_eq!(
            validate_long_url("not-a-url"),
            Err(UrlValidationError::UnsupportedScheme)
        );
        assert_eq!(
            validate_long_url("example.com/https://"),
            Err(UrlValidationError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_other_schemes_rejected() {
        for url in ["ftp://example.com", "javascript:alert(1)", "HTTPS://EXAMPLE.COM"] {
            assert!(validate_long_url(url).is_err(), "{url}");
        }
    }

    #[test]
    fn test_length_limit_is_inclusive() {
        let prefix = "https://";
        let at_limit = format!("{prefix}{}", "a".repeat(MAX_URL_LENGTH - prefix.len()));
        assert!(validate_long_url(&at_limit).is_ok());

        let over_limit = format!("{at_limit}a");
        assert_eq!(
            validate_long_url(&over_limit),
            Err(UrlValidationError::TooLong {
                max: MAX_URL_LENGTH,
                actual: MAX_URL_LENGTH + 1
            })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let prefix = "https://";
        let url = format!("{prefix}{}", "é".repeat(MAX_URL_LENGTH - prefix.len()));
        assert!(validate_long_url(&url).is_ok());
    }

    #[test]
    fn test_field_adapter_sets_code() {
        let err = validate_long_url_field("mailto:someone").unwrap_err();
        assert_eq!(err.code, "unsupported_scheme");
        assert!(err.message.is_some());
    }
}
