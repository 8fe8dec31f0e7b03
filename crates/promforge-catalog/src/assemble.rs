//! Assembly of the catalog pieces into complete configurations.

use promforge_alertmanager::{
    AlertmanagerConfig, GlobalConfig as AmGlobalConfig, InhibitRule, PagerdutyConfig, Receiver,
    Route, SlackConfig,
};
use promforge_core::{Duration, LabelMatcher, Secret};
use promforge_prometheus::{
    AlertingConfig, AlertmanagerEndpoints, GlobalConfig, PrometheusConfig,
};
use promforge_rules::{RuleFile, RuleGroup};

use crate::alerts::kubernetes_alerts;
use crate::recording::{namespace_recording_rules, node_recording_rules};
use crate::scrape::kubernetes_scrape_configs;

/// The catalog's alerts and recording rules as one rule file.
///
/// Groups: `kubernetes.alerts`, `node.rules`, `namespace.rules`.
#[must_use]
pub fn kubernetes_rule_file() -> RuleFile {
    let mut alerts = RuleGroup::new("kubernetes.alerts");
    for alert in kubernetes_alerts() {
        alerts = alerts.with_rule(alert);
    }

    let mut node = RuleGroup::new("node.rules").with_interval(Duration::from_secs(30));
    for rule in node_recording_rules() {
        node = node.with_rule(rule);
    }

    let mut namespace = RuleGroup::new("namespace.rules").with_interval(Duration::from_secs(30));
    for rule in namespace_recording_rules() {
        namespace = namespace.with_rule(rule);
    }

    RuleFile::new()
        .with_group(alerts)
        .with_group(node)
        .with_group(namespace)
}

/// A complete in-cluster prometheus.yml.
///
/// Fifteen-second scrape and evaluation intervals, the catalog scrape
/// set, rules loaded from `/etc/prometheus/rules/`, and alerts delivered
/// to the `alertmanager` service.
#[must_use]
pub fn prometheus_config(cluster: &str) -> PrometheusConfig {
    let mut config = PrometheusConfig::new()
        .with_global(
            GlobalConfig::new()
                .with_scrape_interval(Duration::from_secs(15))
                .with_evaluation_interval(Duration::from_secs(15))
                .with_external_label("cluster", cluster),
        )
        .with_rule_file("/etc/prometheus/rules/*.yml")
        .with_alerting(
            AlertingConfig::new()
                .with_alertmanager(AlertmanagerEndpoints::new(["alertmanager:9093"])),
        );
    for job in kubernetes_scrape_configs() {
        config = config.with_scrape(job);
    }
    config
}

/// A complete alertmanager.yml routing the catalog's severities.
///
/// Critical alerts page through PagerDuty; warnings go to Slack; the
/// root receiver catches everything else. A firing critical alert
/// inhibits the warning of the same name in the same namespace.
#[must_use]
pub fn alertmanager_config(
    slack_api_url: impl Into<Secret>,
    pagerduty_key: impl Into<Secret>,
) -> AlertmanagerConfig {
    let route = Route::new("slack-default")
        .with_group_by(["alertname", "cluster", "namespace"])
        .with_group_wait(Duration::from_secs(30))
        .with_group_interval(Duration::from_minutes(5))
        .with_repeat_interval(Duration::from_hours(4))
        .with_route(
            Route::new("pagerduty-critical")
                .with_matcher(LabelMatcher::eq("severity", "critical")),
        )
        .with_route(
            Route::new("slack-warnings").with_matcher(LabelMatcher::eq("severity", "warning")),
        );

    AlertmanagerConfig::new(route)
        .with_global(
            AmGlobalConfig::new()
                .with_resolve_timeout(Duration::from_minutes(5))
                .with_slack_api_url(slack_api_url),
        )
        .with_receiver(
            Receiver::new("slack-default").with_slack(SlackConfig::new("#alerts")),
        )
        .with_receiver(
            Receiver::new("pagerduty-critical").with_pagerduty(
                PagerdutyConfig::routing_key(pagerduty_key).with_severity("critical"),
            ),
        )
        .with_receiver(
            Receiver::new("slack-warnings")
                .with_slack(SlackConfig::new("#alerts-warnings").with_send_resolved(true)),
        )
        .with_inhibit_rule(
            InhibitRule::new()
                .with_source(LabelMatcher::eq("severity", "critical"))
                .with_target(LabelMatcher::eq("severity", "warning"))
                .with_equal("alertname")
                .with_equal("namespace"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_file_carries_all_three_groups() {
        let file = kubernetes_rule_file();
        let names: Vec<&str> = file.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["kubernetes.alerts", "node.rules", "namespace.rules"]);
        assert_eq!(file.groups[0].rules.len(), 6);
        assert_eq!(file.groups[1].rules.len(), 2);
        assert_eq!(file.groups[2].rules.len(), 2);
    }

    #[test]
    fn prometheus_config_names_the_cluster() {
        let yaml = serde_yaml::to_string(&prometheus_config("prod-eu1")).unwrap();
        assert!(yaml.contains("cluster: prod-eu1"), "{yaml}");
        assert!(yaml.contains("scrape_interval: 15s"), "{yaml}");
        assert!(yaml.contains("- /etc/prometheus/rules/*.yml"), "{yaml}");
        assert!(yaml.contains("- alertmanager:9093"), "{yaml}");
    }

    #[test]
    fn every_routed_receiver_is_declared() {
        let config = alertmanager_config("https://hooks.slack.com/services/T0/B0/x", "pd-key");
        let mut named: Vec<&str> = config.receivers.iter().map(|r| r.name.as_str()).collect();
        named.sort_unstable();

        let mut routed = vec![config.route.receiver.as_str()];
        for child in &config.route.routes {
            routed.push(child.receiver.as_str());
        }
        routed.sort_unstable();

        assert_eq!(named, routed);
    }
}
