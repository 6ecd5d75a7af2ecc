//! Short code generation and validation utilities.
//!
//! Codes are short alphanumeric strings. Generated codes are drawn uniformly
//! from [`ALIAS_ALPHABET`]; custom codes are validated against the same
//! character set and the length bounds below.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Characters a short code may contain.
pub const ALIAS_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of generated codes.
pub const GENERATED_ALIAS_LENGTH: usize = 6;

/// Shortest accepted custom code.
pub const MIN_ALIAS_LENGTH: usize = 3;

/// Longest accepted custom code.
pub const MAX_ALIAS_LENGTH: usize = 6;

/// Number of generated candidates tried before giving up.
pub const MAX_ALIAS_ATTEMPTS: usize = 5;

/// Codes that would shadow fixed routes.
pub const RESERVED_CODES: &[&str] = &["api", "static", "links", "health"];

/// Generates a random short code of [`GENERATED_ALIAS_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use short_url::utils::code_generator::generate_code;
///
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_ALIAS_LENGTH)
        .map(|_| ALIAS_ALPHABET[rng.random_range(0..ALIAS_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` is reserved for a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Validates a caller-supplied custom code.
///
/// # Rules
///
/// - Length: 3-6 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_ALIAS_LENGTH || code.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            format!(
                "Custom alias must be {}-{} characters",
                MIN_ALIAS_LENGTH, MAX_ALIAS_LENGTH
            ),
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters and digits",
            json!({ "code": code }),
        ));
    }

    if is_reserved(code) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), GENERATED_ALIAS_LENGTH);
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generated_code_passes_custom_validation_rules() {
        for _ in 0..200 {
            let code = generate_code();
            if !is_reserved(&code) {
                assert!(validate_custom_code(&code).is_ok(), "{code}");
            }
        }
    }

    #[test]
    fn test_generate_code_rarely_repeats() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        // 62^6 possibilities; a handful of duplicates would already be suspicious.
        assert!(codes.len() > 995);
    }

    #[test]
    fn test_alphabet_is_alphanumeric() {
        assert_eq!(ALIAS_ALPHABET.len(), 62);
        assert!(ALIAS_ALPHABET.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code("abc123").is_ok());
        assert!(validate_custom_code("ab").is_err());
        assert!(validate_custom_code("abc1234").is_err());
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_too_short_message() {
        let err = validate_custom_code("ab").unwrap_err();
        assert!(err.to_string().contains("3-6 characters"));
    }

    #[test]
    fn test_validate_mixed_case_allowed() {
        assert!(validate_custom_code("AbC12").is_ok());
    }

    #[test]
    fn test_validate_rejects_non_alphanumeric() {
        assert!(validate_custom_code("ab-12").is_err());
        assert!(validate_custom_code("ab_12").is_err());
        assert!(validate_custom_code("ab 12").is_err());
        assert!(validate_custom_code("äbc").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
    }

    #[test]
    fn test_reserved_check_ignores_case() {
        assert!(is_reserved("API"));
        assert!(is_reserved("Health"));
        assert!(!is_reserved("apis"));
    }
}
