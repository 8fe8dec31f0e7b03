//! The Kubernetes alert set.
//!
//! Every expression is built from the PromQL AST and stored rendered,
//! so the strings below are exactly what lands in the rule file.

use promforge_core::{Duration, LabelMatcher};
use promforge_promql::{avg, increase, rate, sum, Expr, VectorSelector};
use promforge_rules::AlertingRule;

/// Fires when a node reports not ready for fifteen minutes.
#[must_use]
pub fn node_not_ready() -> AlertingRule {
    let ready = VectorSelector::new("kube_node_status_condition")
        .with_matcher(LabelMatcher::eq("condition", "Ready"))
        .with_matcher(LabelMatcher::eq("status", "true"));

    AlertingRule::new("KubeNodeNotReady", Expr::from(ready).eq_cmp(0.0).to_string())
        .with_for(Duration::from_minutes(15))
        .with_label("severity", "critical")
        .with_annotation("summary", "Node {{ $labels.node }} is not ready")
        .with_annotation(
            "description",
            "{{ $labels.node }} has been unready for more than 15 minutes.",
        )
}

/// Fires when a container restarts more than five times in an hour.
#[must_use]
pub fn pod_crash_looping() -> AlertingRule {
    let restarts = increase(
        VectorSelector::new("kube_pod_container_status_restarts_total")
            .range(Duration::from_hours(1)),
    );

    AlertingRule::new("KubePodCrashLooping", restarts.gt(5.0).to_string())
        .with_for(Duration::from_minutes(15))
        .with_label("severity", "warning")
        .with_annotation(
            "summary",
            "Pod {{ $labels.namespace }}/{{ $labels.pod }} is crash looping",
        )
        .with_annotation(
            "description",
            "Container {{ $labels.container }} restarted more than 5 times in the last hour.",
        )
}

/// Fires when a node spends under ten percent of its CPU idle.
#[must_use]
pub fn node_high_cpu() -> AlertingRule {
    let idle = VectorSelector::new("node_cpu_seconds_total")
        .with_matcher(LabelMatcher::eq("mode", "idle"))
        .range(Duration::from_minutes(5));
    let utilisation = Expr::scalar(1.0).sub(avg(rate(idle)).by(["instance"]));

    AlertingRule::new("NodeHighCpu", utilisation.gt(0.9).to_string())
        .with_for(Duration::from_minutes(15))
        .with_label("severity", "warning")
        .with_annotation("summary", "Node {{ $labels.instance }} CPU above 90%")
        .with_annotation(
            "description",
            "CPU utilisation on {{ $labels.instance }} has exceeded 90% for 15 minutes.",
        )
}

/// Fires when a node has less than ten percent of its memory available.
#[must_use]
pub fn node_high_memory() -> AlertingRule {
    let utilisation = Expr::scalar(1.0).sub(
        Expr::metric("node_memory_MemAvailable_bytes")
            .div(Expr::metric("node_memory_MemTotal_bytes")),
    );

    AlertingRule::new("NodeHighMemory", utilisation.gt(0.9).to_string())
        .with_for(Duration::from_minutes(15))
        .with_label("severity", "warning")
        .with_annotation("summary", "Node {{ $labels.instance }} memory above 90%")
        .with_annotation(
            "description",
            "Memory utilisation on {{ $labels.instance }} has exceeded 90% for 15 minutes.",
        )
}

/// Fires when a persistent volume drops under ten percent free space.
#[must_use]
pub fn persistent_volume_filling_up() -> AlertingRule {
    let free = Expr::metric("kubelet_volume_stats_available_bytes")
        .div(Expr::metric("kubelet_volume_stats_capacity_bytes"));

    AlertingRule::new("KubePersistentVolumeFillingUp", free.lt(0.1).to_string())
        .with_for(Duration::from_minutes(5))
        .with_label("severity", "critical")
        .with_annotation(
            "summary",
            "Volume {{ $labels.persistentvolumeclaim }} is almost full",
        )
        .with_annotation(
            "description",
            "The volume claimed by {{ $labels.persistentvolumeclaim }} in namespace {{ $labels.namespace }} has less than 10% free.",
        )
}

/// Fires when more than five percent of API server requests error.
#[must_use]
pub fn apiserver_errors() -> AlertingRule {
    let errors = sum(rate(
        VectorSelector::new("apiserver_request_total")
            .with_matcher(LabelMatcher::re("code", "5.."))
            .range(Duration::from_minutes(5)),
    ));
    let total = sum(rate(
        VectorSelector::new("apiserver_request_total").range(Duration::from_minutes(5)),
    ));
    let ratio = Expr::from(errors).div(total);

    AlertingRule::new("KubeApiServerErrors", ratio.gt(0.05).to_string())
        .with_for(Duration::from_minutes(10))
        .with_label("severity", "critical")
        .with_annotation("summary", "API server error ratio above 5%")
        .with_annotation(
            "description",
            "More than 5% of apiserver requests have returned 5xx over the last 5 minutes.",
        )
}

/// The whole set, in rule-file order.
#[must_use]
pub fn kubernetes_alerts() -> Vec<AlertingRule> {
    vec![
        node_not_ready(),
        pod_crash_looping(),
        node_high_cpu(),
        node_high_memory(),
        persistent_volume_filling_up(),
        apiserver_errors(),
    ]
}
