//! Packaging dashboards for the Grafana sidecar.

use promforge_core::{validate_resource_name, Result, ToJsonPretty};
use promforge_operator::ConfigMap;

use crate::dashboard::Dashboard;

/// Label the Grafana sidecar watches for.
const SIDECAR_LABEL: &str = "grafana_dashboard";

/// Annotation selecting the dashboard's folder.
const FOLDER_ANNOTATION: &str = "grafana_folder";

/// Wraps a dashboard in the ConfigMap shape the sidecar discovers.
///
/// The JSON lands under `data.<name>.json` and the map carries the
/// `grafana_dashboard: "1"` label; pass a folder to add the
/// `grafana_folder` annotation steering where the dashboard appears.
///
/// # Errors
///
/// Returns [`promforge_core::Error::InvalidName`] if `name` is not a
/// valid Kubernetes resource name, and
/// [`promforge_core::Error::Serialization`] if the dashboard cannot be
/// rendered to JSON.
///
/// # Example
///
/// ```rust
/// use promforge_grafana::{dashboard_config_map, Dashboard};
///
/// let map = dashboard_config_map(
///     "cluster-overview",
///     "monitoring",
///     Some("Kubernetes"),
///     &Dashboard::new("Cluster Overview"),
/// )?;
/// assert_eq!(map.metadata.labels["grafana_dashboard"], "1");
/// # Ok::<(), promforge_core::Error>(())
/// ```
pub fn dashboard_config_map(
    name: &str,
    namespace: &str,
    folder: Option<&str>,
    dashboard: &Dashboard,
) -> Result<ConfigMap> {
    // The name doubles as metadata.name, which the API server validates.
    validate_resource_name(name)?;
    let mut map = ConfigMap::new(name, namespace)
        .with_label(SIDECAR_LABEL, "1")
        .with_data(format!("{name}.json"), dashboard.to_json_pretty()?);
    if let Some(folder) = folder {
        map = map.with_annotation(FOLDER_ANNOTATION, folder);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_json_under_name_dot_json() {
        let map = dashboard_config_map(
            "cluster-overview",
            "monitoring",
            None,
            &Dashboard::new("Cluster Overview"),
        )
        .unwrap();

        assert_eq!(map.metadata.name, "cluster-overview");
        assert_eq!(map.metadata.namespace, "monitoring");
        assert!(map.data.contains_key("cluster-overview.json"));
        assert!(map.data["cluster-overview.json"].contains("\"title\": \"Cluster Overview\""));
        assert!(map.metadata.annotations.is_empty());
    }

    #[test]
    fn folder_becomes_an_annotation() {
        let map = dashboard_config_map(
            "cluster-overview",
            "monitoring",
            Some("Kubernetes"),
            &Dashboard::new("Cluster Overview"),
        )
        .unwrap();

        assert_eq!(map.metadata.annotations["grafana_folder"], "Kubernetes");
    }

    #[test]
    fn emitted_yaml_block_is_sidecar_shaped() {
        let map = dashboard_config_map("ov", "monitoring", None, &Dashboard::new("Ov")).unwrap();
        let yaml = serde_yaml::to_string(&map).unwrap();

        assert!(yaml.contains("grafana_dashboard: '1'"), "{yaml}");
        assert!(yaml.contains("ov.json: |-"), "{yaml}");
        assert!(yaml.contains("\"schemaVersion\": 36"), "{yaml}");
    }

    #[test]
    fn rejects_invalid_resource_names() {
        let result =
            dashboard_config_map("Cluster Overview", "monitoring", None, &Dashboard::new("Ov"));
        assert!(result.is_err());
    }
}
