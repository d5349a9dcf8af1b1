//! Target URL validation.
//!
//! Only absolute `http`/`https` URLs are accepted as redirect targets. Anything else
//! (`javascript:`, `data:`, `ftp:`, relative paths) is rejected before reaching the store.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    /// Control characters or surrounding whitespace, which the parser would silently drop.
    #[error("URL contains control characters or surrounding whitespace")]
    InvalidCharacters,
}

/// Parses `input` and checks that it is an absolute `http`/`https` URL.
///
/// Callers store the input string as given; the parsed form is only used for the check.
/// Input the parser would rewrite (tabs, newlines, other control characters, surrounding
/// whitespace) is rejected so the stored string is always a valid `Location` value.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input,
/// [`UrlValidationError::InvalidCharacters`] for control characters or surrounding whitespace,
/// [`UrlValidationError::InvalidFormat`] for unparsable or relative input, and
/// [`UrlValidationError::UnsupportedProtocol`] for any other scheme.
pub fn validate_target_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.trim() != input || input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(UrlValidationError::UnsupportedProtocol),
    }
}

/// Returns true if `input` is an absolute `http`/`https` URL.
pub fn is_valid_url(input: &str) -> bool {
    validate_target_url(input).is_ok()
}
