//! Scrape job configuration.

use serde::{Deserialize, Serialize};

use promforge_core::{Duration, Secret};
use promforge_relabel::RelabelRule;

use crate::discovery::{
    ConsulSdConfig, DnsSdConfig, Ec2SdConfig, FileSdConfig, KubernetesSdConfig, StaticConfig,
};
use crate::http::{Authorization, BasicAuth, TlsConfig};

/// URL scheme used to reach scrape targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

/// One scrape job: how to find targets and how to pull from them.
///
/// Only `job_name` is required. Everything else is omitted from the
/// output when unset, so the emitted job contains exactly what differs
/// from the server defaults.
///
/// # Example
///
/// ```rust
/// use promforge_core::{Duration, ToYaml};
/// use promforge_prometheus::{KubernetesRole, KubernetesSdConfig, ScrapeConfig};
/// use promforge_relabel::RelabelRule;
///
/// let job = ScrapeConfig::new("kubernetes-pods")
///     .with_scrape_interval(Duration::from_secs(30))
///     .with_kubernetes_sd(KubernetesSdConfig::new(KubernetesRole::Pod))
///     .with_relabel(RelabelRule::keep_if(
///         ["__meta_kubernetes_pod_annotation_prometheus_io_scrape"],
///         "true",
///     ));
/// let yaml = job.to_yaml()?;
/// assert!(yaml.starts_with("job_name: kubernetes-pods\n"));
/// # Ok::<(), promforge_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// The job name, attached to every scraped series as `job`.
    pub job_name: String,
    /// Per-job scrape interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_interval: Option<Duration>,
    /// Per-job scrape timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_timeout: Option<Duration>,
    /// Metrics path; `/metrics` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_path: Option<String>,
    /// URL scheme; `http` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<Scheme>,
    /// Whether scraped labels win over server-attached ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honor_labels: Option<bool>,
    /// Basic-auth credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    /// `Authorization` header credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    /// Inline bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<Secret>,
    /// Path to a file holding the bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token_file: Option<String>,
    /// TLS settings for the scrape connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
    /// Kubernetes API discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kubernetes_sd_configs: Vec<KubernetesSdConfig>,
    /// Consul catalog discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consul_sd_configs: Vec<ConsulSdConfig>,
    /// EC2 instance discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ec2_sd_configs: Vec<Ec2SdConfig>,
    /// DNS query discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_sd_configs: Vec<DnsSdConfig>,
    /// File-based discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_sd_configs: Vec<FileSdConfig>,
    /// Fixed target lists.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_configs: Vec<StaticConfig>,
    /// Target relabeling, applied before the scrape.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relabel_configs: Vec<RelabelRule>,
    /// Sample relabeling, applied before ingestion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metric_relabel_configs: Vec<RelabelRule>,
}

impl ScrapeConfig {
    /// Creates a job with only the name set.
    #[must_use]
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            scrape_interval: None,
            scrape_timeout: None,
            metrics_path: None,
            scheme: None,
            honor_labels: None,
            basic_auth: None,
            authorization: None,
            bearer_token: None,
            bearer_token_file: None,
            tls_config: None,
            kubernetes_sd_configs: Vec::new(),
            consul_sd_configs: Vec::new(),
            ec2_sd_configs: Vec::new(),
            dns_sd_configs: Vec::new(),
            file_sd_configs: Vec::new(),
            static_configs: Vec::new(),
            relabel_configs: Vec::new(),
            metric_relabel_configs: Vec::new(),
        }
    }

    /// Sets the per-job scrape interval.
    #[must_use]
    pub fn with_scrape_interval(mut self, interval: Duration) -> Self {
        self.scrape_interval = Some(interval);
        self
    }

    /// Sets the per-job scrape timeout.
    #[must_use]
    pub fn with_scrape_timeout(mut self, timeout: Duration) -> Self {
        self.scrape_timeout = Some(timeout);
        self
    }

    /// Sets the metrics path.
    #[must_use]
    pub fn with_metrics_path(mut self, path: impl Into<String>) -> Self {
        self.metrics_path = Some(path.into());
        self
    }

    /// Sets the URL scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Sets label-conflict behavior explicitly.
    #[must_use]
    pub fn with_honor_labels(mut self, honor: bool) -> Self {
        self.honor_labels = Some(honor);
        self
    }

    /// Sets basic-auth credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Sets `Authorization` header credentials.
    #[must_use]
    pub fn with_authorization(mut self, auth: Authorization) -> Self {
        self.authorization = Some(auth);
        self
    }

    /// Sets an inline bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<Secret>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets a bearer token file path.
    #[must_use]
    pub fn with_bearer_token_file(mut self, path: impl Into<String>) -> Self {
        self.bearer_token_file = Some(path.into());
        self
    }

    /// Sets TLS settings.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls_config = Some(tls);
        self
    }

    /// Adds a Kubernetes discovery.
    #[must_use]
    pub fn with_kubernetes_sd(mut self, sd: KubernetesSdConfig) -> Self {
        self.kubernetes_sd_configs.push(sd);
        self
    }

    /// Adds a Consul discovery.
    #[must_use]
    pub fn with_consul_sd(mut self, sd: ConsulSdConfig) -> Self {
        self.consul_sd_configs.push(sd);
        self
    }

    /// Adds an EC2 discovery.
    #[must_use]
    pub fn with_ec2_sd(mut self, sd: Ec2SdConfig) -> Self {
        self.ec2_sd_configs.push(sd);
        self
    }

    /// Adds a DNS discovery.
    #[must_use]
    pub fn with_dns_sd(mut self, sd: DnsSdConfig) -> Self {
        self.dns_sd_configs.push(sd);
        self
    }

    /// Adds a file-based discovery.
    #[must_use]
    pub fn with_file_sd(mut self, sd: FileSdConfig) -> Self {
        self.file_sd_configs.push(sd);
        self
    }

    /// Adds a fixed target list.
    #[must_use]
    pub fn with_static(mut self, sc: StaticConfig) -> Self {
        self.static_configs.push(sc);
        self
    }

    /// Appends a target relabeling rule.
    #[must_use]
    pub fn with_relabel(mut self, rule: RelabelRule) -> Self {
        self.relabel_configs.push(rule);
        self
    }

    /// Appends a sample relabeling rule.
    #[must_use]
    pub fn with_metric_relabel(mut self, rule: RelabelRule) -> Self {
        self.metric_relabel_configs.push(rule);
        self
    }
}

#[cfg(test)]
mod tests {
    use promforge_core::ToYaml;

    use super::*;

    #[test]
    fn minimal_job_emits_only_name() {
        assert_eq!(
            ScrapeConfig::new("prometheus").to_yaml().unwrap(),
            "job_name: prometheus\n"
        );
    }

    #[test]
    fn static_job_canonical_shape() {
        let job = ScrapeConfig::new("node")
            .with_scrape_interval(Duration::from_secs(15))
            .with_static(StaticConfig::new(["localhost:9100"]));
        assert_eq!(
            job.to_yaml().unwrap(),
            "job_name: node\nscrape_interval: 15s\nstatic_configs:\n- targets:\n  - localhost:9100\n"
        );
    }

    #[test]
    fn relabel_lists_keep_order() {
        let job = ScrapeConfig::new("pods")
            .with_relabel(RelabelRule::keep_if(["__meta_kubernetes_pod_phase"], "Running"))
            .with_relabel(RelabelRule::rename("__meta_kubernetes_pod_name", "pod"));
        let yaml = job.to_yaml().unwrap();
        let keep = yaml.find("action: keep").unwrap();
        let rename = yaml.find("target_label: pod").unwrap();
        assert!(keep < rename, "{yaml}");
    }

    #[test]
    fn honor_labels_false_is_explicit() {
        let yaml = ScrapeConfig::new("federate")
            .with_honor_labels(false)
            .to_yaml()
            .unwrap();
        assert!(yaml.contains("honor_labels: false"), "{yaml}");
    }

    #[test]
    fn scheme_serializes_lowercase() {
        let yaml = ScrapeConfig::new("secure")
            .with_scheme(Scheme::Https)
            .with_tls(TlsConfig::new().with_ca_file("/etc/prometheus/ca.crt"))
            .to_yaml()
            .unwrap();
        assert!(yaml.contains("scheme: https"), "{yaml}");
        assert!(yaml.contains("tls_config:\n  ca_file: /etc/prometheus/ca.crt"), "{yaml}");
    }

    #[test]
    fn round_trips_through_yaml() {
        let job = ScrapeConfig::new("consul-services")
            .with_scrape_timeout(Duration::from_secs(10))
            .with_consul_sd(
                ConsulSdConfig::new("consul.service:8500")
                    .with_service("api")
                    .with_tag("prod"),
            )
            .with_metric_relabel(RelabelRule::drop_if(["__name__"], "go_gc_.*"));
        let yaml = job.to_yaml().unwrap();
        let parsed: ScrapeConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, job);
    }
}
