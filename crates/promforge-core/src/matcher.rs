//! Label matchers with the Alertmanager scalar wire form.
//!
//! A matcher is a predicate over one alert label. On the wire it is a
//! single string — `severity="critical"`, `job!~"kube.*"` — used both as
//! standalone scalars and inside matcher lists on routes and inhibit
//! rules.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// The comparison operator of a label matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOp {
    /// Exact equality (`=`).
    Equal,
    /// Exact inequality (`!=`).
    NotEqual,
    /// Regex match (`=~`).
    Regex,
    /// Negated regex match (`!~`).
    NotRegex,
}

impl MatchOp {
    /// Returns the operator token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Regex => "=~",
            Self::NotRegex => "!~",
        }
    }
}

impl fmt::Display for MatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicate over a single label: `name OP "value"`.
///
/// The textual form always double-quotes the value. Values pass through
/// verbatim in both directions: embedded double quotes are neither escaped
/// on emission nor unescaped on parse.
///
/// # Example
///
/// ```rust
/// use promforge_core::LabelMatcher;
///
/// let m = LabelMatcher::eq("severity", "critical");
/// assert_eq!(m.to_string(), "severity=\"critical\"");
///
/// let parsed: LabelMatcher = "job!~\"kube.*\"".parse().unwrap();
/// assert_eq!(parsed.value, "kube.*");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelMatcher {
    /// The label name.
    pub name: String,
    /// The comparison operator.
    pub op: MatchOp,
    /// The label value or regex, stored unquoted.
    pub value: String,
}

impl LabelMatcher {
    /// Creates a matcher with an explicit operator.
    #[must_use]
    pub fn new(name: impl Into<String>, op: MatchOp, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op,
            value: value.into(),
        }
    }

    /// Creates an equality matcher (`name="value"`).
    #[must_use]
    pub fn eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, MatchOp::Equal, value)
    }

    /// Creates an inequality matcher (`name!="value"`).
    #[must_use]
    pub fn ne(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, MatchOp::NotEqual, value)
    }

    /// Creates a regex matcher (`name=~"value"`).
    #[must_use]
    pub fn re(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, MatchOp::Regex, value)
    }

    /// Creates a negated regex matcher (`name!~"value"`).
    #[must_use]
    pub fn not_re(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, MatchOp::NotRegex, value)
    }

    /// Parses a matcher from its scalar wire form.
    ///
    /// The scan tries the two-character operators (`!=`, `=~`, `!~`) at
    /// each position before `=`, so `k!="v"` splits at `!=` rather than
    /// `=`. One outer pair of double quotes around the value is stripped
    /// when both are present; otherwise the value is taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMatcher`] when no operator occurs in the
    /// input.
    pub fn parse(input: &str) -> Result<Self> {
        let bytes = input.as_bytes();
        for (pos, window) in bytes.windows(2).enumerate() {
            let (op, len) = match window {
                [b'!', b'='] => (MatchOp::NotEqual, 2),
                [b'!', b'~'] => (MatchOp::NotRegex, 2),
                [b'=', b'~'] => (MatchOp::Regex, 2),
                [b'=', _] => (MatchOp::Equal, 1),
                _ => continue,
            };
            let name = &input[..pos];
            let value = unquote(&input[pos + len..]);
            return Ok(Self::new(name, op, value));
        }
        // A trailing '=' with nothing after it still splits.
        if bytes.last() == Some(&b'=') {
            return Ok(Self::eq(&input[..input.len() - 1], ""));
        }
        Err(Error::MalformedMatcher {
            input: input.to_string(),
        })
    }
}

/// Strips one outer pair of double quotes when both are present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

impl fmt::Display for LabelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}\"{}\"", self.name, self.op, self.value)
    }
}

impl FromStr for LabelMatcher {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for LabelMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct MatcherVisitor;

impl Visitor<'_> for MatcherVisitor {
    type Value = LabelMatcher;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a label matcher such as `severity=\"critical\"`")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<LabelMatcher, E> {
        LabelMatcher::parse(v).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for LabelMatcher {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_str(MatcherVisitor)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    // ========================================================================
    // Rendering
    // ========================================================================

    #[test]
    fn renders_with_quoted_value() {
        assert_eq!(
            LabelMatcher::eq("severity", "critical").to_string(),
            "severity=\"critical\""
        );
        assert_eq!(
            LabelMatcher::ne("env", "dev").to_string(),
            "env!=\"dev\""
        );
        assert_eq!(
            LabelMatcher::re("job", "kube.*").to_string(),
            "job=~\"kube.*\""
        );
        assert_eq!(
            LabelMatcher::not_re("pod", "canary-.*").to_string(),
            "pod!~\"canary-.*\""
        );
    }

    #[test]
    fn renders_empty_value() {
        assert_eq!(LabelMatcher::eq("team", "").to_string(), "team=\"\"");
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test_case("severity=\"critical\"", "severity", MatchOp::Equal, "critical" ; "equal quoted")]
    #[test_case("severity=critical", "severity", MatchOp::Equal, "critical" ; "equal unquoted")]
    #[test_case("k!=\"v\"", "k", MatchOp::NotEqual, "v" ; "not equal splits before equal")]
    #[test_case("job=~\"kube.*\"", "job", MatchOp::Regex, "kube.*" ; "regex")]
    #[test_case("pod!~\"canary-.*\"", "pod", MatchOp::NotRegex, "canary-.*" ; "not regex")]
    #[test_case("team=\"\"", "team", MatchOp::Equal, "" ; "empty quoted value")]
    #[test_case("team=", "team", MatchOp::Equal, "" ; "trailing operator")]
    #[test_case("a=\"b=c\"", "a", MatchOp::Equal, "b=c" ; "operator inside value")]
    fn parses_wire_form(input: &str, name: &str, op: MatchOp, value: &str) {
        let m = LabelMatcher::parse(input).unwrap();
        assert_eq!(m.name, name);
        assert_eq!(m.op, op);
        assert_eq!(m.value, value);
    }

    #[test]
    fn keeps_unbalanced_quote_verbatim() {
        let m = LabelMatcher::parse("k=\"v").unwrap();
        assert_eq!(m.value, "\"v");
    }

    #[test_case("severity" ; "no operator")]
    #[test_case("" ; "empty")]
    #[test_case("a!b" ; "bare bang")]
    fn rejects_without_operator(input: &str) {
        let err = LabelMatcher::parse(input).unwrap_err();
        assert!(matches!(err, Error::MalformedMatcher { .. }), "{err}");
    }

    // ========================================================================
    // Serde
    // ========================================================================

    #[test]
    fn serializes_as_yaml_scalar() {
        let yaml = serde_yaml::to_string(&LabelMatcher::eq("severity", "critical")).unwrap();
        assert_eq!(yaml.trim(), "severity=\"critical\"");
    }

    #[test]
    fn matcher_list_is_scalar_sequence() {
        let matchers = vec![
            LabelMatcher::eq("severity", "critical"),
            LabelMatcher::re("team", "infra|platform"),
        ];
        let yaml = serde_yaml::to_string(&matchers).unwrap();
        assert!(yaml.contains("- severity=\"critical\""));
        assert!(yaml.contains("- team=~\"infra|platform\""));
    }

    #[test]
    fn yaml_round_trip() {
        let original = LabelMatcher::not_re("instance", "10\\..*");
        let yaml = serde_yaml::to_string(&original).unwrap();
        let parsed: LabelMatcher = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, original);
    }

    // ========================================================================
    // Round-trip invariant
    // ========================================================================

    proptest! {
        #[test]
        fn round_trips_quote_free_values(
            name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}",
            value in "[^\"]{0,24}",
            op_idx in 0_usize..4,
        ) {
            let op = [MatchOp::Equal, MatchOp::NotEqual, MatchOp::Regex, MatchOp::NotRegex][op_idx];
            let original = LabelMatcher::new(name, op, value);
            let parsed = LabelMatcher::parse(&original.to_string()).unwrap();
            prop_assert_eq!(parsed, original);
        }
    }
}
