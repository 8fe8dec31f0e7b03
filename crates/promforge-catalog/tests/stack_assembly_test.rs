//! Assembles the complete monitoring stack and checks the emitted files.
//!
//! These tests build the catalog's prometheus.yml, alertmanager.yml,
//! rule file and operator resources end to end, parse the YAML back,
//! and confirm a serialize/parse/serialize cycle is lossless.

use promforge_alertmanager::AlertmanagerConfig;
use promforge_catalog::{
    alertmanager_config, cluster_overview, kubernetes_rule_file, prometheus_config,
};
use promforge_core::{to_multi_yaml, Duration, ToYaml};
use promforge_grafana::dashboard_config_map;
use promforge_operator::{Endpoint, LabelSelector, PrometheusRule, ServiceMonitor};
use promforge_prometheus::PrometheusConfig;
use promforge_rules::RuleFile;

// ==================== Helper Functions ====================

fn reserialized<T>(yaml: &str) -> String
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    let parsed: T = serde_yaml::from_str(yaml).expect("generated YAML should parse back");
    serde_yaml::to_string(&parsed).expect("reparsed value should serialize")
}

// ==================== prometheus.yml ====================

#[test]
fn prometheus_yml_parses_back_losslessly() {
    let yaml = prometheus_config("prod-eu1")
        .to_yaml()
        .expect("config should serialize");
    assert_eq!(reserialized::<PrometheusConfig>(&yaml), yaml);
}

#[test]
fn prometheus_yml_carries_the_standard_jobs() {
    let yaml = prometheus_config("prod-eu1")
        .to_yaml()
        .expect("config should serialize");
    for line in [
        "- job_name: kubernetes-apiservers",
        "- job_name: kubernetes-nodes",
        "- job_name: kubernetes-cadvisor",
        "- job_name: kubernetes-pods",
        "- job_name: node-exporter",
    ] {
        assert!(yaml.contains(line), "missing {line} in:\n{yaml}");
    }
    assert!(yaml.contains("external_labels:\n    cluster: prod-eu1"), "{yaml}");
    assert!(yaml.contains("- alertmanager:9093"), "{yaml}");
}

// ==================== Rule files ====================

#[test]
fn rule_file_parses_back_losslessly() {
    let yaml = kubernetes_rule_file()
        .to_yaml()
        .expect("rule file should serialize");
    assert_eq!(reserialized::<RuleFile>(&yaml), yaml);
}

#[test]
fn rule_file_mixes_alerts_and_recordings() {
    let yaml = kubernetes_rule_file()
        .to_yaml()
        .expect("rule file should serialize");
    assert!(yaml.contains("- name: kubernetes.alerts"), "{yaml}");
    assert!(yaml.contains("- alert: KubeNodeNotReady"), "{yaml}");
    assert!(yaml.contains("for: 15m"), "{yaml}");
    assert!(
        yaml.contains("- record: instance:node_cpu_utilisation:rate5m"),
        "{yaml}"
    );
    assert!(
        yaml.contains("- record: namespace:container_cpu_usage_seconds:sum_rate5m"),
        "{yaml}"
    );
}

// ==================== alertmanager.yml ====================

#[test]
fn alertmanager_yml_parses_back_losslessly() {
    let yaml = alertmanager_config("https://hooks.slack.com/services/T000/B000/XXX", "pd-key")
        .to_yaml()
        .expect("config should serialize");
    assert_eq!(reserialized::<AlertmanagerConfig>(&yaml), yaml);
}

#[test]
fn alertmanager_yml_routes_critical_alerts_to_pagerduty() {
    let yaml = alertmanager_config("https://hooks.slack.com/services/T000/B000/XXX", "pd-key")
        .to_yaml()
        .expect("config should serialize");
    assert!(yaml.contains("receiver: slack-default"), "{yaml}");
    assert!(yaml.contains("receiver: pagerduty-critical"), "{yaml}");
    assert!(yaml.contains("- severity=\"critical\""), "{yaml}");
    assert!(yaml.contains("routing_key: pd-key"), "{yaml}");
    assert!(
        yaml.contains("slack_api_url: https://hooks.slack.com/services/T000/B000/XXX"),
        "{yaml}"
    );
    assert!(yaml.contains("equal:\n  - alertname\n  - namespace\n"), "{yaml}");
}

// ==================== Operator resources ====================

#[test]
fn prometheus_rule_crd_embeds_the_rule_file_unchanged() {
    let mut crd = PrometheusRule::new("promforge-rules", "monitoring");
    for group in kubernetes_rule_file().groups {
        crd = crd.with_group(group);
    }

    let yaml = crd.to_yaml().expect("resource should serialize");
    assert!(
        yaml.starts_with("apiVersion: monitoring.coreos.com/v1\nkind: PrometheusRule\n"),
        "{yaml}"
    );
    assert!(yaml.contains("- alert: KubeNodeNotReady"), "{yaml}");
    assert!(
        yaml.contains("- record: namespace:container_memory_working_set_bytes:sum"),
        "{yaml}"
    );
    assert_eq!(reserialized::<PrometheusRule>(&yaml), yaml);
}

#[test]
fn node_exporter_service_monitor_selects_by_label() {
    let monitor = ServiceMonitor::new("node-exporter", "monitoring")
        .with_selector(LabelSelector::match_label(
            "app.kubernetes.io/name",
            "node-exporter",
        ))
        .with_endpoint(Endpoint::port("metrics").with_interval(Duration::from_secs(30)));

    let yaml = monitor.to_yaml().expect("resource should serialize");
    assert!(
        yaml.contains("matchLabels:\n      app.kubernetes.io/name: node-exporter"),
        "{yaml}"
    );
    assert!(yaml.contains("- port: metrics"), "{yaml}");
    assert!(yaml.contains("interval: 30s"), "{yaml}");
    assert_eq!(reserialized::<ServiceMonitor>(&yaml), yaml);
}

#[test]
fn monitors_join_into_one_apply_stream() {
    let monitors = vec![
        ServiceMonitor::new("node-exporter", "monitoring"),
        ServiceMonitor::new("kube-state-metrics", "monitoring"),
    ];

    let stream = to_multi_yaml(&monitors).expect("stream should serialize");
    assert_eq!(stream.matches("---\n").count(), 1);
    assert!(stream.contains("name: node-exporter"), "{stream}");
    assert!(stream.contains("name: kube-state-metrics"), "{stream}");
}

// ==================== Dashboards ====================

#[test]
fn dashboard_config_map_carries_valid_sidecar_json() {
    let dashboard = cluster_overview();
    let map = dashboard_config_map("cluster-overview", "monitoring", Some("Kubernetes"), &dashboard)
        .expect("dashboard should render");

    let yaml = map.to_yaml().expect("config map should serialize");
    assert!(yaml.starts_with("apiVersion: v1\nkind: ConfigMap\n"), "{yaml}");
    assert!(yaml.contains("grafana_dashboard: '1'"), "{yaml}");
    assert!(yaml.contains("grafana_folder: Kubernetes"), "{yaml}");

    let body = &map.data["cluster-overview.json"];
    let value: serde_json::Value =
        serde_json::from_str(body).expect("dashboard JSON should parse");
    assert_eq!(value["title"], "Kubernetes / Cluster Overview");
    assert_eq!(value["schemaVersion"], 36);
}

// ==================== Files on disk ====================

#[test]
fn write_yaml_lands_world_readable_files() {
    let dir = tempfile::tempdir().expect("tempdir should create");
    let path = dir.path().join("prometheus.yml");

    let config = prometheus_config("prod-eu1");
    config.write_yaml(&path).expect("write should succeed");

    let written = std::fs::read_to_string(&path).expect("file should read back");
    assert_eq!(written, config.to_yaml().expect("config should serialize"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path)
            .expect("metadata should read")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
