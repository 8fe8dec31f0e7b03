//! Relabel rules and the helper constructors for the common idioms.

use serde::{Deserialize, Serialize};

use crate::action::RelabelAction;

/// One relabeling step in a scrape or metric pipeline.
///
/// Serializes as a flat mapping with the key order Prometheus documents;
/// unset fields are omitted entirely, so the emitted rule contains only
/// what it actually configures. Prometheus fills the rest with its
/// defaults (`separator: ;`, `regex: (.*)`, `replacement: $1`,
/// `action: replace`).
///
/// The helper constructors cover the idioms whose correct shape is easy
/// to get wrong; arbitrary rules can always be built from the fields
/// directly.
///
/// # Example
///
/// ```rust
/// use promforge_relabel::RelabelRule;
///
/// let rule = RelabelRule::keep_if(["job"], "api|gateway");
/// let yaml = serde_yaml::to_string(&rule)?;
/// assert_eq!(yaml, "source_labels:\n- job\nregex: api|gateway\naction: keep\n");
/// # Ok::<(), serde_yaml::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelabelRule {
    /// Labels whose values are joined with the separator as input.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_labels: Vec<String>,
    /// Join separator for the source labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Regex matched against the joined input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Modulus for the `hashmod` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulus: Option<u64>,
    /// Label written by value-producing actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_label: Option<String>,
    /// Replacement template, `$1`-style capture references allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// The action to perform; `replace` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RelabelAction>,
}

impl RelabelRule {
    /// Keeps targets whose joined source-label value matches the regex.
    #[must_use]
    pub fn keep_if<I, S>(source_labels: I, regex: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_labels: source_labels.into_iter().map(Into::into).collect(),
            regex: Some(regex.into()),
            action: Some(RelabelAction::Keep),
            ..Self::default()
        }
    }

    /// Drops targets whose joined source-label value matches the regex.
    #[must_use]
    pub fn drop_if<I, S>(source_labels: I, regex: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_labels: source_labels.into_iter().map(Into::into).collect(),
            regex: Some(regex.into()),
            action: Some(RelabelAction::Drop),
            ..Self::default()
        }
    }

    /// Copies the value of one label to another.
    ///
    /// Relies on the `replace` defaults: regex `(.*)` and replacement
    /// `$1` pass the source value through unchanged.
    #[must_use]
    pub fn rename(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            source_labels: vec![from.into()],
            target_label: Some(to.into()),
            ..Self::default()
        }
    }

    /// Promotes a service-discovery meta label to a persistent label.
    ///
    /// The source is given without the `__meta_` prefix and is sanitized
    /// first, so discovery fields named after annotations work directly:
    /// `from_meta("kubernetes_pod_label_app.kubernetes.io/name", "app")`
    /// reads `__meta_kubernetes_pod_label_app_kubernetes_io_name`.
    #[must_use]
    pub fn from_meta(meta: &str, target_label: impl Into<String>) -> Self {
        Self {
            source_labels: vec![format!("__meta_{}", sanitize_label_name(meta))],
            target_label: Some(target_label.into()),
            ..Self::default()
        }
    }

    /// Shards targets by hashing the source labels modulo `modulus`.
    #[must_use]
    pub fn hashmod<I, S>(source_labels: I, modulus: u64, target_label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_labels: source_labels.into_iter().map(Into::into).collect(),
            modulus: Some(modulus),
            target_label: Some(target_label.into()),
            action: Some(RelabelAction::HashMod),
            ..Self::default()
        }
    }

    /// Copies every label whose name matches the regex, naming the copy
    /// from the first capture group.
    #[must_use]
    pub fn labelmap(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            action: Some(RelabelAction::LabelMap),
            ..Self::default()
        }
    }

    /// Removes every label whose name matches the regex.
    #[must_use]
    pub fn label_drop(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            action: Some(RelabelAction::LabelDrop),
            ..Self::default()
        }
    }

    /// Keeps only labels whose name matches the regex.
    #[must_use]
    pub fn label_keep(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            action: Some(RelabelAction::LabelKeep),
            ..Self::default()
        }
    }

    /// General replacement: writes the expanded replacement into the
    /// target label when the regex matches the joined source.
    #[must_use]
    pub fn replace<I, S>(
        source_labels: I,
        regex: impl Into<String>,
        target_label: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_labels: source_labels.into_iter().map(Into::into).collect(),
            regex: Some(regex.into()),
            target_label: Some(target_label.into()),
            replacement: Some(replacement.into()),
            action: Some(RelabelAction::Replace),
            ..Self::default()
        }
    }
}

/// Rewrites a dotted or slashed name into the underscore form Prometheus
/// meta labels use: `.`, `/`, and `-` become `_`.
///
/// # Example
///
/// ```rust
/// use promforge_relabel::sanitize_label_name;
///
/// assert_eq!(
///     sanitize_label_name("app.kubernetes.io/name"),
///     "app_kubernetes_io_name"
/// );
/// ```
#[must_use]
pub fn sanitize_label_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '/' | '-' => '_',
            other => other,
        })
        .collect()
}
