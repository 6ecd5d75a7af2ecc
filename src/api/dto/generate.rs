//! DTOs for the link creation endpoint.

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};

/// Compiled regex for custom alias validation.
static CUSTOM_ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").unwrap());

/// Request body of `POST /api/generate`.
///
/// An empty `custom_alias` is treated the same as an absent one.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    /// Destination; must be an absolute URL.
    #[validate(required, url)]
    pub url: Option<String>,

    /// Bounds match `MIN_ALIAS_LENGTH` and `MAX_ALIAS_LENGTH`.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(min = 3, max = 6))]
    #[validate(regex(path = "*CUSTOM_ALIAS_REGEX"))]
    pub custom_alias: Option<String>,

    /// Informational expiry; must lie in the future when given.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl GenerateRequest {
    /// Runs the declared rules plus the checks `validator` cannot express:
    /// `expires_at` must lie after `now`, and `url` must be usable as a
    /// `Location` header verbatim.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        // The `url` rule parses leniently and drops control characters, so a
        // value can pass it and still be unusable in a header.
        if let Some(url) = &self.url
            && HeaderValue::from_str(url).is_err()
            && !errors.field_errors().contains_key("url")
        {
            let mut error = ValidationError::new("url");
            error.message = Some(Cow::Borrowed("must not contain control characters"));
            error.add_param(Cow::Borrowed("value"), url);
            errors.add("url", error);
        }

        if let Some(expires_at) = self.expires_at
            && expires_at <= now
        {
            let mut error = ValidationError::new("future");
            error.message = Some(Cow::Borrowed("must be in the future"));
            error.add_param(Cow::Borrowed("value"), &expires_at);
            errors.add("expires_at", error);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn parse(json: &str) -> GenerateRequest {
        serde_json::from_str(json).unwrap()
    }

    fn failed_fields(request: &GenerateRequest) -> Vec<String> {
        let mut fields: Vec<String> = request
            .check(Utc::now())
            .unwrap_err()
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn test_valid_request() {
        let request = parse(r#"{"url": "https://example.com", "custom_alias": "abc123"}"#);
        assert!(request.check(Utc::now()).is_ok());
    }

    #[test]
    fn test_empty_alias_is_absent() {
        let request = parse(r#"{"url": "https://example.com", "custom_alias": ""}"#);
        assert!(request.custom_alias.is_none());
        assert!(request.check(Utc::now()).is_ok());
    }

    #[test]
    fn test_missing_url() {
        let request = parse(r#"{}"#);
        assert_eq!(failed_fields(&request), vec!["url"]);
    }

    #[test]
    fn test_relative_url_rejected() {
        let request = parse(r#"{"url": "not a url"}"#);
        assert_eq!(failed_fields(&request), vec!["url"]);
    }

    #[test]
    fn test_alias_rules() {
        for alias in ["ab", "abcdefg", "ab_cd", "ab cd"] {
            let request = GenerateRequest {
                url: Some("https://example.com".to_string()),
                custom_alias: Some(alias.to_string()),
                expires_at: None,
            };
            assert_eq!(failed_fields(&request), vec!["custom_alias"], "alias {alias}");
        }
    }

    #[test]
    fn test_control_characters_in_url_rejected() {
        for url in ["https://example.com/a\nb", "https://example.com/a\rb", "https://example.com/\u{7f}"] {
            let request = GenerateRequest {
                url: Some(url.to_string()),
                custom_alias: None,
                expires_at: None,
            };
            assert_eq!(failed_fields(&request), vec!["url"], "url {url:?}");
        }
    }

    #[test]
    fn test_expires_at_must_be_future() {
        let request = GenerateRequest {
            url: Some("https://example.com".to_string()),
            custom_alias: None,
            expires_at: Some(Utc::now() - Duration::hours(1)),
        };
        assert_eq!(failed_fields(&request), vec!["expires_at"]);

        let request = GenerateRequest {
            expires_at: Some(Utc::now() + Duration::hours(1)),
            ..request
        };
        assert!(request.check(Utc::now()).is_ok());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let request = GenerateRequest {
            url: Some("nope".to_string()),
            custom_alias: Some("x".to_string()),
            expires_at: Some(Utc::now() - Duration::days(1)),
        };
        assert_eq!(
            failed_fields(&request),
            vec!["custom_alias", "expires_at", "url"]
        );
    }
}
