//! The top-level server configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use promforge_core::Duration;

use crate::alerting::AlertingConfig;
use crate::remote::{RemoteReadConfig, RemoteWriteConfig};
use crate::scrape::ScrapeConfig;

/// Server-wide defaults and identity labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default scrape interval for all jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_interval: Option<Duration>,
    /// Default scrape timeout for all jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_timeout: Option<Duration>,
    /// Rule evaluation interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_interval: Option<Duration>,
    /// Labels attached to outgoing data (federation, remote write,
    /// alerts).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub external_labels: BTreeMap<String, String>,
}

impl GlobalConfig {
    /// Creates an empty global block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default scrape interval.
    #[must_use]
    pub fn with_scrape_interval(mut self, interval: Duration) -> Self {
        self.scrape_interval = Some(interval);
        self
    }

    /// Sets the default scrape timeout.
    #[must_use]
    pub fn with_scrape_timeout(mut self, timeout: Duration) -> Self {
        self.scrape_timeout = Some(timeout);
        self
    }

    /// Sets the rule evaluation interval.
    #[must_use]
    pub fn with_evaluation_interval(mut self, interval: Duration) -> Self {
        self.evaluation_interval = Some(interval);
        self
    }

    /// Attaches an external label.
    #[must_use]
    pub fn with_external_label(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.external_labels.insert(name.into(), value.into());
        self
    }
}

/// A complete `prometheus.yml`.
///
/// Sections render in the declaration order below; empty sections are
/// omitted, so a config carrying only scrape jobs emits only
/// `scrape_configs`.
///
/// # Example
///
/// ```rust
/// use promforge_core::{Duration, ToYaml};
/// use promforge_prometheus::{GlobalConfig, PrometheusConfig, ScrapeConfig, StaticConfig};
///
/// let config = PrometheusConfig::new()
///     .with_global(GlobalConfig::new().with_scrape_interval(Duration::from_secs(15)))
///     .with_scrape(
///         ScrapeConfig::new("prometheus").with_static(StaticConfig::new(["localhost:9090"])),
///     )
///     .with_rule_file("/etc/prometheus/rules/*.yml");
///
/// let yaml = config.to_yaml()?;
/// assert!(yaml.starts_with("global:\n  scrape_interval: 15s\n"));
/// # Ok::<(), promforge_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrometheusConfig {
    /// Server-wide defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalConfig>,
    /// The scrape jobs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scrape_configs: Vec<ScrapeConfig>,
    /// Globs of rule files to load.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_files: Vec<String>,
    /// Where to push firing alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerting: Option<AlertingConfig>,
    /// Remote-write endpoints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remote_write: Vec<RemoteWriteConfig>,
    /// Remote-read endpoints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remote_read: Vec<RemoteReadConfig>,
}

impl PrometheusConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global block.
    #[must_use]
    pub fn with_global(mut self, global: GlobalConfig) -> Self {
        self.global = Some(global);
        self
    }

    /// Adds a scrape job.
    #[must_use]
    pub fn with_scrape(mut self, job: ScrapeConfig) -> Self {
        self.scrape_configs.push(job);
        self
    }

    /// Adds a rule file glob.
    #[must_use]
    pub fn with_rule_file(mut self, glob: impl Into<String>) -> Self {
        self.rule_files.push(glob.into());
        self
    }

    /// Sets the alerting block.
    #[must_use]
    pub fn with_alerting(mut self, alerting: AlertingConfig) -> Self {
        self.alerting = Some(alerting);
        self
    }

    /// Adds a remote-write endpoint.
    #[must_use]
    pub fn with_remote_write(mut self, endpoint: RemoteWriteConfig) -> Self {
        self.remote_write.push(endpoint);
        self
    }

    /// Adds a remote-read endpoint.
    #[must_use]
    pub fn with_remote_read(mut self, endpoint: RemoteReadConfig) -> Self {
        self.remote_read.push(endpoint);
        self
    }
}

#[cfg(test)]
mod tests {
    use promforge_core::ToYaml;
    use promforge_relabel::RelabelRule;

    use crate::alerting::AlertmanagerEndpoints;
    use crate::discovery::{KubernetesRole, KubernetesSdConfig, StaticConfig};

    use super::*;

    #[test]
    fn empty_config_is_empty_mapping() {
        assert_eq!(PrometheusConfig::new().to_yaml().unwrap().trim(), "{}");
    }

    #[test]
    fn sections_render_in_declaration_order() {
        let config = PrometheusConfig::new()
            .with_global(GlobalConfig::new().with_scrape_interval(Duration::from_secs(15)))
            .with_scrape(ScrapeConfig::new("self"))
            .with_rule_file("/etc/prometheus/rules/*.yml")
            .with_alerting(
                AlertingConfig::new()
                    .with_alertmanager(AlertmanagerEndpoints::new(["alertmanager:9093"])),
            );

        let yaml = config.to_yaml().unwrap();
        let positions: Vec<usize> = ["global:", "scrape_configs:", "rule_files:", "alerting:"]
            .iter()
            .map(|key| yaml.find(key).unwrap_or_else(|| panic!("missing {key}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{yaml}");
    }

    #[test]
    fn unused_sections_are_omitted() {
        let yaml = PrometheusConfig::new()
            .with_scrape(ScrapeConfig::new("only-job"))
            .to_yaml()
            .unwrap();
        assert_eq!(yaml, "scrape_configs:\n- job_name: only-job\n");
    }

    #[test]
    fn kubernetes_scrape_round_trips() {
        let config = PrometheusConfig::new()
            .with_global(
                GlobalConfig::new()
                    .with_scrape_interval(Duration::from_secs(30))
                    .with_evaluation_interval(Duration::from_secs(30))
                    .with_external_label("cluster", "eu-1"),
            )
            .with_scrape(
                ScrapeConfig::new("kubernetes-pods")
                    .with_kubernetes_sd(
                        KubernetesSdConfig::new(KubernetesRole::Pod)
                            .with_namespaces(["default", "monitoring"]),
                    )
                    .with_relabel(RelabelRule::keep_if(
                        ["__meta_kubernetes_pod_annotation_prometheus_io_scrape"],
                        "true",
                    ))
                    .with_relabel(RelabelRule::labelmap("__meta_kubernetes_pod_label_(.+)")),
            )
            .with_scrape(
                ScrapeConfig::new("static-nodes")
                    .with_static(StaticConfig::new(["10.0.0.1:9100", "10.0.0.2:9100"])),
            );

        let yaml = config.to_yaml().unwrap();
        let parsed: PrometheusConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn global_external_labels_nest_as_mapping() {
        let yaml = PrometheusConfig::new()
            .with_global(GlobalConfig::new().with_external_label("region", "eu"))
            .to_yaml()
            .unwrap();
        assert_eq!(yaml, "global:\n  external_labels:\n    region: eu\n");
    }
}
