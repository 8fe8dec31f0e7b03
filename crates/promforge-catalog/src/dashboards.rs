//! The cluster-overview dashboard.

use promforge_core::LabelMatcher;
use promforge_grafana::{Dashboard, Panel, Target, TemplateVar};
use promforge_promql::{sum, VectorSelector};

use crate::recording::{
    namespace_cpu_usage, namespace_memory_usage, node_cpu_utilisation, node_memory_utilisation,
};

/// One dashboard summarizing cluster, node, and namespace health.
///
/// The time series panels read the recording rules from
/// [`crate::recording`], so the dashboard needs those rules loaded to
/// show data.
#[must_use]
pub fn cluster_overview() -> Dashboard {
    let nodes_ready = sum(VectorSelector::new("kube_node_status_condition")
        .with_matcher(LabelMatcher::eq("condition", "Ready"))
        .with_matcher(LabelMatcher::eq("status", "true")));
    let pods_running = sum(VectorSelector::new("kube_pod_status_phase")
        .with_matcher(LabelMatcher::eq("phase", "Running")));

    Dashboard::new("Kubernetes / Cluster Overview")
        .with_uid("k8s-cluster-overview")
        .with_tag("kubernetes")
        .with_timezone("browser")
        .with_refresh("30s")
        .with_time("now-6h", "now")
        .with_variable(TemplateVar::query(
            "node",
            "label_values(node_uname_info, nodename)",
        ))
        .with_panel(Panel::row(1, "Cluster"))
        .with_panel(
            Panel::stat(2, "Nodes Ready")
                .at(0, 1)
                .with_target(Target::expr(nodes_ready.to_string())),
        )
        .with_panel(
            Panel::stat(3, "Pods Running")
                .at(6, 1)
                .with_target(Target::expr(pods_running.to_string())),
        )
        .with_panel(Panel::row(4, "Nodes").at(0, 5))
        .with_panel(
            Panel::timeseries(5, "CPU Utilisation")
                .at(0, 6)
                .with_target(
                    Target::expr(node_cpu_utilisation().record).with_legend("{{instance}}"),
                )
                .with_unit("percentunit"),
        )
        .with_panel(
            Panel::timeseries(6, "Memory Utilisation")
                .at(12, 6)
                .with_target(
                    Target::expr(node_memory_utilisation().record).with_legend("{{instance}}"),
                )
                .with_unit("percentunit"),
        )
        .with_panel(Panel::row(7, "Namespaces").at(0, 14))
        .with_panel(
            Panel::timeseries(8, "CPU by Namespace")
                .at(0, 15)
                .with_target(
                    Target::expr(namespace_cpu_usage().record).with_legend("{{namespace}}"),
                ),
        )
        .with_panel(
            Panel::timeseries(9, "Memory by Namespace")
                .at(12, 15)
                .with_target(
                    Target::expr(namespace_memory_usage().record).with_legend("{{namespace}}"),
                )
                .with_unit("bytes"),
        )
}
