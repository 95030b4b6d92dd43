//! Short id generation and custom alias validation.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Alphabet for generated short ids: digits, lowercase, uppercase.
pub const SHORT_ID_ALPHABET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of every generated short id.
pub const SHORT_ID_LENGTH: usize = 8;

/// Maximum length of a custom alias.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Aliases that would be shadowed by fixed routes.
const RESERVED_ALIASES: &[&str] = &["api", "health"];

/// Generates a random short id.
///
/// Each character is drawn uniformly from [`SHORT_ID_ALPHABET`]. Calls are
/// independent; uniqueness is not guaranteed here and must be enforced by the
/// link registry.
pub fn generate_short_id() -> String {
    let mut rng = rand::rng();

    (0..SHORT_ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..SHORT_ID_ALPHABET.len());
            SHORT_ID_ALPHABET[idx] as char
        })
        .collect()
}

/// Validates a trimmed, non-empty custom alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Custom alias must be 1-64 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
