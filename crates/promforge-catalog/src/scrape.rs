//! The Kubernetes scrape jobs, with the classic relabel idioms.

use promforge_prometheus::{
    KubernetesRole, KubernetesSdConfig, Scheme, ScrapeConfig, TlsConfig,
};
use promforge_relabel::RelabelRule;

/// CA bundle mounted into every pod by the service account.
const SERVICE_ACCOUNT_CA: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";

/// Bearer token mounted into every pod by the service account.
const SERVICE_ACCOUNT_TOKEN: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

fn in_cluster_tls() -> TlsConfig {
    TlsConfig {
        ca_file: Some(SERVICE_ACCOUNT_CA.to_string()),
        ..TlsConfig::default()
    }
}

/// Scrapes the API server through the `kubernetes` service endpoints.
#[must_use]
pub fn apiserver() -> ScrapeConfig {
    ScrapeConfig::new("kubernetes-apiservers")
        .with_scheme(Scheme::Https)
        .with_tls(in_cluster_tls())
        .with_bearer_token_file(SERVICE_ACCOUNT_TOKEN)
        .with_kubernetes_sd(KubernetesSdConfig::new(KubernetesRole::Endpoints))
        .with_relabel(RelabelRule::keep_if(
            [
                "__meta_kubernetes_namespace",
                "__meta_kubernetes_service_name",
                "__meta_kubernetes_endpoint_port_name",
            ],
            "default;kubernetes;https",
        ))
}

/// Scrapes each kubelet directly on its node port.
#[must_use]
pub fn kubelet() -> ScrapeConfig {
    ScrapeConfig::new("kubernetes-nodes")
        .with_scheme(Scheme::Https)
        .with_tls(TlsConfig {
            insecure_skip_verify: Some(true),
            ..in_cluster_tls()
        })
        .with_bearer_token_file(SERVICE_ACCOUNT_TOKEN)
        .with_kubernetes_sd(KubernetesSdConfig::new(KubernetesRole::Node))
        .with_relabel(RelabelRule::labelmap("__meta_kubernetes_node_label_(.+)"))
}

/// Scrapes container metrics from each kubelet's embedded cAdvisor.
#[must_use]
pub fn cadvisor() -> ScrapeConfig {
    ScrapeConfig::new("kubernetes-cadvisor")
        .with_scheme(Scheme::Https)
        .with_metrics_path("/metrics/cadvisor")
        .with_tls(TlsConfig {
            insecure_skip_verify: Some(true),
            ..in_cluster_tls()
        })
        .with_bearer_token_file(SERVICE_ACCOUNT_TOKEN)
        .with_kubernetes_sd(KubernetesSdConfig::new(KubernetesRole::Node))
        .with_relabel(RelabelRule::labelmap("__meta_kubernetes_node_label_(.+)"))
}

/// Scrapes pods opting in through `prometheus.io/*` annotations.
///
/// `prometheus.io/scrape: "true"` enables the target;
/// `prometheus.io/path` and `prometheus.io/port` override the defaults.
#[must_use]
pub fn annotated_pods() -> ScrapeConfig {
    ScrapeConfig::new("kubernetes-pods")
        .with_kubernetes_sd(KubernetesSdConfig::new(KubernetesRole::Pod))
        .with_relabel(RelabelRule::keep_if(
            ["__meta_kubernetes_pod_annotation_prometheus_io_scrape"],
            "true",
        ))
        .with_relabel(RelabelRule::replace(
            ["__meta_kubernetes_pod_annotation_prometheus_io_path"],
            "(.+)",
            "__metrics_path__",
            "$1",
        ))
        .with_relabel(RelabelRule::replace(
            [
                "__address__",
                "__meta_kubernetes_pod_annotation_prometheus_io_port",
            ],
            r"([^:]+)(?::\d+)?;(\d+)",
            "__address__",
            "$1:$2",
        ))
        .with_relabel(RelabelRule::from_meta("kubernetes_namespace", "namespace"))
        .with_relabel(RelabelRule::from_meta("kubernetes_pod_name", "pod"))
}

/// Scrapes node-exporter through its service endpoints.
#[must_use]
pub fn node_exporter() -> ScrapeConfig {
    ScrapeConfig::new("node-exporter")
        .with_kubernetes_sd(KubernetesSdConfig::new(KubernetesRole::Endpoints))
        .with_relabel(RelabelRule::keep_if(
            ["__meta_kubernetes_endpoints_name"],
            "node-exporter",
        ))
        .with_relabel(RelabelRule::from_meta(
            "kubernetes_endpoint_node_name",
            "instance",
        ))
}

/// The whole scrape set, in file order.
#[must_use]
pub fn kubernetes_scrape_configs() -> Vec<ScrapeConfig> {
    vec![
        apiserver(),
        kubelet(),
        cadvisor(),
        annotated_pods(),
        node_exporter(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apiserver_keeps_only_the_https_endpoint() {
        let yaml = serde_yaml::to_string(&apiserver()).unwrap();
        assert!(yaml.contains("job_name: kubernetes-apiservers"), "{yaml}");
        assert!(yaml.contains("scheme: https"), "{yaml}");
        assert!(yaml.contains("regex: default;kubernetes;https"), "{yaml}");
        assert!(yaml.contains("action: keep"), "{yaml}");
        assert!(
            yaml.contains("ca_file: /var/run/secrets/kubernetes.io/serviceaccount/ca.crt"),
            "{yaml}"
        );
    }

    #[test]
    fn annotated_pods_rewrite_address_from_port_annotation() {
        let yaml = serde_yaml::to_string(&annotated_pods()).unwrap();
        assert!(yaml.contains("role: pod"), "{yaml}");
        assert!(yaml.contains("regex: 'true'"), "{yaml}");
        assert!(yaml.contains("target_label: __address__"), "{yaml}");
        assert!(yaml.contains("replacement: $1:$2"), "{yaml}");
    }

    #[test]
    fn job_names_are_unique() {
        let configs = kubernetes_scrape_configs();
        let mut names: Vec<&str> = configs.iter().map(|c| c.job_name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), configs.len());
    }
}
