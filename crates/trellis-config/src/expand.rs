//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.
//!
//! Bare `$VAR` is left as-is. An unset variable without a default is an
//! error naming the config field it appeared in.

use crate::ConfigError;

/// Variable referenced without a default and not set.
struct MissingVar(String);

/// Expand environment variable references in `value`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(&escape_bare_dollars(value), |var| {
        std::env::var(var)
            .map(Some)
            .map_err(|_| MissingVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Double every `$` that does not open a `${` reference, so that
/// `shellexpand` emits it literally.
fn escape_bare_dollars(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        escaped.push(c);
        if c == '$' && chars.peek() != Some(&'{') {
            escaped.push('$');
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("TRELLIS_TEST_CONTENT_DIR", "/srv/content");
        }
        let result =
            expand_env("${TRELLIS_TEST_CONTENT_DIR}/sites.yaml", "content.file").unwrap();
        assert_eq!(result, "/srv/content/sites.yaml");
        unsafe {
            std::env::remove_var("TRELLIS_TEST_CONTENT_DIR");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("TRELLIS_TEST_UNSET_DIR");
        }
        let result =
            expand_env("${TRELLIS_TEST_UNSET_DIR:-content}.yaml", "content.file").unwrap();
        assert_eq!(result, "content.yaml");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("TRELLIS_TEST_MISSING");
        }
        let err = expand_env("${TRELLIS_TEST_MISSING}", "content.file").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in content.file: ${TRELLIS_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_literals_and_bare_dollar_unchanged() {
        assert_eq!(
            expand_env("content.yaml", "content.file").unwrap(),
            "content.yaml"
        );
        assert_eq!(
            expand_env("$HOME/content.yaml", "content.file").unwrap(),
            "$HOME/content.yaml"
        );
    }

    #[test]
    fn test_bare_dollar_kept_next_to_braced_reference() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("TRELLIS_TEST_MIXED");
        }
        let result = expand_env("$HOME/${TRELLIS_TEST_MIXED:-a}/$", "content.file").unwrap();
        assert_eq!(result, "$HOME/a/$");
    }
}
