//! Node and namespace recording rules.
//!
//! Names follow the `level:metric:operations` convention so dashboards
//! can reference them without re-deriving the expressions.

use promforge_core::{Duration, LabelMatcher};
use promforge_promql::{avg, rate, sum, Expr, VectorSelector};
use promforge_rules::RecordingRule;

/// Per-node CPU utilisation over five minutes, 0 to 1.
#[must_use]
pub fn node_cpu_utilisation() -> RecordingRule {
    let idle = VectorSelector::new("node_cpu_seconds_total")
        .with_matcher(LabelMatcher::eq("mode", "idle"))
        .range(Duration::from_minutes(5));

    RecordingRule::new(
        "instance:node_cpu_utilisation:rate5m",
        Expr::scalar(1.0).sub(avg(rate(idle)).by(["instance"])).to_string(),
    )
}

/// Per-node memory utilisation, 0 to 1.
#[must_use]
pub fn node_memory_utilisation() -> RecordingRule {
    let utilisation = Expr::scalar(1.0).sub(
        Expr::metric("node_memory_MemAvailable_bytes")
            .div(Expr::metric("node_memory_MemTotal_bytes")),
    );

    RecordingRule::new("instance:node_memory_utilisation:ratio", utilisation.to_string())
}

/// Per-namespace CPU usage in cores.
#[must_use]
pub fn namespace_cpu_usage() -> RecordingRule {
    let usage = sum(rate(
        VectorSelector::new("container_cpu_usage_seconds_total").range(Duration::from_minutes(5)),
    ))
    .by(["namespace"]);

    RecordingRule::new("namespace:container_cpu_usage_seconds:sum_rate5m", usage.to_string())
}

/// Per-namespace working-set memory in bytes.
#[must_use]
pub fn namespace_memory_usage() -> RecordingRule {
    let usage = sum(Expr::metric("container_memory_working_set_bytes")).by(["namespace"]);

    RecordingRule::new("namespace:container_memory_working_set_bytes:sum", usage.to_string())
}

/// The node-level rules.
#[must_use]
pub fn node_recording_rules() -> Vec<RecordingRule> {
    vec![node_cpu_utilisation(), node_memory_utilisation()]
}

/// The namespace-level rules.
#[must_use]
pub fn namespace_recording_rules() -> Vec<RecordingRule> {
    vec![namespace_cpu_usage(), namespace_memory_usage()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_cpu_expression_is_canonical() {
        assert_eq!(
            node_cpu_utilisation().expr,
            "(1 - avg by (instance) (rate(node_cpu_seconds_total{mode=\"idle\"}[5m])))"
        );
    }

    #[test]
    fn namespace_cpu_expression_has_no_binary_parens() {
        assert_eq!(
            namespace_cpu_usage().expr,
            "sum by (namespace) (rate(container_cpu_usage_seconds_total[5m]))"
        );
    }

    #[test]
    fn record_names_follow_level_metric_operation() {
        for rule in node_recording_rules().into_iter().chain(namespace_recording_rules()) {
            assert_eq!(rule.record.split(':').count(), 3, "{}", rule.record);
        }
    }

    #[test]
    fn record_names_are_valid_metric_names() {
        for rule in node_recording_rules().into_iter().chain(namespace_recording_rules()) {
            assert!(
                promforge_core::validate_metric_name(&rule.record).is_ok(),
                "{}",
                rule.record
            );
        }
    }
}
