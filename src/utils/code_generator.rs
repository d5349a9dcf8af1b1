//! Short code generation and validation utilities.
//!
//! Codes are 6-8 characters from `[A-Za-z0-9]`. Generated codes always use the minimum length.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet for generated codes.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 8;

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("code pattern is valid"));

/// Generates a random short code.
///
/// Each character is drawn uniformly from [`CODE_ALPHABET`], giving 62^6 possible codes.
/// Collisions are resolved by the caller against the store.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` is 6-8 ASCII alphanumeric characters.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a caller-supplied custom code.
///
/// # Errors
///
/// Returns [`AppError::InvalidCodeFormat`] if the code fails [`is_valid_code`].
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if is_valid_code(code) {
        return Ok(());
    }

    Err(AppError::invalid_code_format(
        format!("Code must be {MIN_CODE_LENGTH}-{MAX_CODE_LENGTH} alphanumeric characters"),
        json!({ "code": code, "provided_length": code.chars().count() }),
    ))
}
