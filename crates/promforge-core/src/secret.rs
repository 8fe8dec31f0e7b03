//! Credential wrapper that redacts itself in diagnostics.
//!
//! [`Secret`] holds bearer tokens, basic-auth passwords, and webhook URLs
//! that must reach the serialized configuration intact but must never leak
//! through `Debug` or `Display` output, log lines included.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder emitted in place of a non-empty secret value.
const REDACTED: &str = "<secret>";

/// A sensitive string value.
///
/// Serialization emits the raw value so generated configuration files
/// work; `Debug` and `Display` emit `<secret>` instead. An empty secret
/// renders as an empty string so optional credentials stay invisible in
/// formatted output.
///
/// # Example
///
/// ```rust
/// use promforge_core::Secret;
///
/// let token = Secret::new("s3cr3t");
/// assert_eq!(format!("{token}"), "<secret>");
/// assert_eq!(token.expose(), "s3cr3t");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wraps a sensitive value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates a secret holding an environment-variable reference.
    ///
    /// The stored value is `${NAME}`, the substitution syntax understood
    /// by deployment tooling, so the literal credential never enters the
    /// generated file.
    #[must_use]
    pub fn from_env_var(name: impl AsRef<str>) -> Self {
        Self(format!("${{{}}}", name.as_ref()))
    }

    /// Returns the raw value.
    ///
    /// The name is deliberately loud: call sites that read a secret should
    /// be easy to find in review.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the secret holds no value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(\"\")")
        } else {
            write!(f, "Secret({REDACTED})")
        }
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            f.write_str(REDACTED)
        }
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
