//! Name validation for the Prometheus data model.
//!
//! Generated configuration is only as good as the identifiers inside it:
//! a metric name with a stray hyphen or a label starting with a digit is
//! rejected at scrape time, long after the file shipped. These checks
//! catch that class of mistake while the entity is still being built.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Maximum length for Kubernetes resource names (DNS subdomain).
const MAX_RESOURCE_NAME_LENGTH: usize = 253;

/// Regex for valid metric names.
static METRIC_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").unwrap_or_else(|_| unreachable!()));

/// Regex for valid label names.
static LABEL_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap_or_else(|_| unreachable!()));

/// Regex for valid Kubernetes resource names (RFC 1123 subdomain).
static RESOURCE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)*$")
        .unwrap_or_else(|_| unreachable!())
});

/// Validates a metric name.
///
/// Metric names may contain letters, digits, underscores, and colons, and
/// must not start with a digit. Colons are reserved by convention for
/// recording rules, which is exactly where this crate produces them.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name does not match the model.
///
/// # Example
///
/// ```rust
/// use promforge_core::validate_metric_name;
///
/// validate_metric_name("http_requests_total")?;
/// validate_metric_name("job:http_errors:rate5m")?;
/// assert!(validate_metric_name("2xx_responses").is_err());
/// # Ok::<(), promforge_core::Error>(())
/// ```
pub fn validate_metric_name(name: &str) -> Result<()> {
    if METRIC_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            kind: "metric name",
            name: name.to_string(),
        })
    }
}

/// Validates a label name.
///
/// Label names may contain letters, digits, and underscores, and must not
/// start with a digit. Names starting with `__` are reserved for internal
/// use but accepted here: relabeling rules legitimately read and write
/// `__address__`, `__meta_*`, and friends.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name does not match the model.
pub fn validate_label_name(name: &str) -> Result<()> {
    if LABEL_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            kind: "label name",
            name: name.to_string(),
        })
    }
}

/// Validates a Kubernetes resource name.
///
/// Resource names follow RFC 1123 subdomain rules: lowercase alphanumeric
/// labels separated by dots, hyphens allowed inside a label, 253
/// characters at most.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name does not conform.
pub fn validate_resource_name(name: &str) -> Result<()> {
    if name.len() <= MAX_RESOURCE_NAME_LENGTH && RESOURCE_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            kind: "resource name",
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Metric Name Tests
    // =========================================================================

    #[test]
    fn test_valid_metric_name() {
        assert!(validate_metric_name("http_requests_total").is_ok());
        assert!(validate_metric_name("up").is_ok());
        assert!(validate_metric_name("job:http_errors:rate5m").is_ok());
        assert!(validate_metric_name("_hidden").is_ok());
        assert!(validate_metric_name(":leading_colon").is_ok());
    }

    #[test]
    fn test_metric_name_invalid() {
        assert!(validate_metric_name("").is_err());
        assert!(validate_metric_name("2xx_responses").is_err());
        assert!(validate_metric_name("http-requests").is_err());
        assert!(validate_metric_name("http requests").is_err());
    }

    #[test]
    fn test_metric_name_error_names_kind() {
        let err = validate_metric_name("bad-name").unwrap_err();
        assert_eq!(err.to_string(), "invalid metric name: \"bad-name\"");
    }

    // =========================================================================
    // Label Name Tests
    // =========================================================================

    #[test]
    fn test_valid_label_name() {
        assert!(validate_label_name("severity").is_ok());
        assert!(validate_label_name("_private").is_ok());
        assert!(validate_label_name("__address__").is_ok());
        assert!(validate_label_name("__meta_kubernetes_pod_name").is_ok());
    }

    #[test]
    fn test_label_name_invalid() {
        assert!(validate_label_name("").is_err());
        assert!(validate_label_name("0severity").is_err());
        assert!(validate_label_name("app.kubernetes.io/name").is_err());
        assert!(validate_label_name("a:b").is_err()); // colons are metric-only
    }

    // =========================================================================
    // Resource Name Tests
    // =========================================================================

    #[test]
    fn test_valid_resource_name() {
        assert!(validate_resource_name("gateway-rules").is_ok());
        assert!(validate_resource_name("a").is_ok());
        assert!(validate_resource_name("dash.board.v2").is_ok());
    }

    #[test]
    fn test_resource_name_invalid() {
        assert!(validate_resource_name("").is_err());
        assert!(validate_resource_name("Gateway").is_err()); // uppercase
        assert!(validate_resource_name("-rules").is_err()); // leading hyphen
        assert!(validate_resource_name("rules-").is_err()); // trailing hyphen
        assert!(validate_resource_name(&"a".repeat(254)).is_err());
    }
}
