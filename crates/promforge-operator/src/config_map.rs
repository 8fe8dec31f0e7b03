//! The plain v1 ConfigMap, used to ship generated files into a cluster.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;

/// A string-keyed bundle of configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    /// Always `v1`.
    pub api_version: String,
    /// Always `ConfigMap`.
    pub kind: String,
    /// Name, namespace, labels.
    pub metadata: ObjectMeta,
    /// File name to file content, emitted in sorted order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl ConfigMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            metadata: ObjectMeta::new(name, namespace),
            data: BTreeMap::new(),
        }
    }

    /// Adds one file.
    #[must_use]
    pub fn with_data(mut self, file: impl Into<String>, content: impl Into<String>) -> Self {
        self.data.insert(file.into(), content.into());
        self
    }

    /// Adds a label to the metadata.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_label(name, value);
        self
    }

    /// Adds an annotation to the metadata.
    #[must_use]
    pub fn with_annotation(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_annotation(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_core_v1() {
        let map = ConfigMap::new("prometheus-config", "monitoring")
            .with_data("prometheus.yml", "global: {}\n");

        let yaml = serde_yaml::to_string(&map).unwrap();
        assert!(yaml.starts_with("apiVersion: v1\nkind: ConfigMap\n"), "{yaml}");
        assert!(yaml.contains("prometheus.yml: |"), "{yaml}");
    }

    #[test]
    fn data_files_emit_sorted() {
        let map = ConfigMap::new("rules", "monitoring")
            .with_data("b.yml", "x")
            .with_data("a.yml", "y");

        let yaml = serde_yaml::to_string(&map).unwrap();
        let a = yaml.find("a.yml").unwrap();
        let b = yaml.find("b.yml").unwrap();
        assert!(a < b, "{yaml}");
    }

    #[test]
    fn config_map_round_trips() {
        let map = ConfigMap::new("grafana-dashboards", "monitoring")
            .with_label("grafana_dashboard", "1")
            .with_data("overview.json", "{\n  \"title\": \"Overview\"\n}");

        let yaml = serde_yaml::to_string(&map).unwrap();
        let parsed: ConfigMap = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, map);
    }
}
