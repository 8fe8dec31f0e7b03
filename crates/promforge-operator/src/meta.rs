//! The Kubernetes object envelope pieces shared by every resource.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifying metadata for a namespaced resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name.
    pub name: String,
    /// Namespace the resource lives in.
    pub namespace: String,
    /// Labels, emitted in sorted order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotations, emitted in sorted order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Creates metadata with no labels or annotations.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(name.into(), value.into());
        self
    }
}

/// A reference to one key of a Kubernetes `Secret`.
///
/// Operator resources never carry credentials inline; the cluster
/// resolves the reference at scrape or notification time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Name of the `Secret` in the resource's namespace.
    pub name: String,
    /// Key within the secret's data.
    pub key: String,
}

impl SecretKeySelector {
    /// References `key` inside the secret `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_serializes_in_declaration_order() {
        let meta = ObjectMeta::new("team-alerts", "monitoring")
            .with_label("team", "platform")
            .with_annotation("owner", "oncall@example.com");

        assert_eq!(
            serde_yaml::to_string(&meta).unwrap(),
            "name: team-alerts\n\
             namespace: monitoring\n\
             labels:\n\
             \x20\x20team: platform\n\
             annotations:\n\
             \x20\x20owner: oncall@example.com\n"
        );
    }

    #[test]
    fn empty_maps_are_omitted() {
        let yaml = serde_yaml::to_string(&ObjectMeta::new("a", "b")).unwrap();
        assert_eq!(yaml, "name: a\nnamespace: b\n");
    }

    #[test]
    fn secret_selector_is_a_two_field_mapping() {
        let selector = SecretKeySelector::new("alertmanager-secrets", "pagerduty-key");
        assert_eq!(
            serde_yaml::to_string(&selector).unwrap(),
            "name: alertmanager-secrets\nkey: pagerduty-key\n"
        );
    }
}
