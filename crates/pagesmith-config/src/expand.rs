//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_token_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PAGESMITH_TEST_TOKEN", "abc123");
        }
        let result = expand_env("${PAGESMITH_TEST_TOKEN}", "api.token").unwrap();
        assert_eq!(result, "abc123");
        unsafe {
            std::env::remove_var("PAGESMITH_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PAGESMITH_UNSET_VAR");
        }
        let result = expand_env("${PAGESMITH_UNSET_VAR:-fallback}", "api.token").unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_expand_empty_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PAGESMITH_UNSET_EMPTY");
        }
        let result = expand_env("${PAGESMITH_UNSET_EMPTY:-}", "api.token").unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PAGESMITH_MISSING_VAR");
        }
        let err = expand_env("${PAGESMITH_MISSING_VAR}", "api.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("PAGESMITH_MISSING_VAR"));
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_expand_embedded_var_in_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PAGESMITH_CMS_HOST", "cms.example.com");
        }
        let result = expand_env("https://${PAGESMITH_CMS_HOST}/api", "api.base_url").unwrap();
        assert_eq!(result, "https://cms.example.com/api");
        unsafe {
            std::env::remove_var("PAGESMITH_CMS_HOST");
        }
    }

    #[test]
    fn test_literal_unchanged() {
        let result = expand_env("https://example.com/$path", "api.base_url").unwrap();
        assert_eq!(result, "https://example.com/$path");
    }
}
