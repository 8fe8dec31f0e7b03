//! Prometheus Operator custom resources.
//!
//! `promforge-operator` wraps scrape, rule, and routing configuration in
//! the Kubernetes envelope `{apiVersion, kind, metadata, spec}` so it can
//! be applied to a cluster instead of written to disk. Spec keys are
//! camelCase, applied per schema with `#[serde(rename_all = "camelCase")]`,
//! and credentials never ride inline: anywhere the file-based schemas use
//! a raw secret, these resources take a [`SecretKeySelector`] pointing at
//! a Kubernetes `Secret` key.
//!
//! # Features
//!
//! - **ServiceMonitor / PodMonitor**: Label-selected scrape targets with
//!   per-endpoint intervals, auth, and relabeling
//! - **PrometheusRule**: Rule groups reused verbatim from
//!   `promforge-rules`
//! - **AlertmanagerConfig**: The `v1alpha1` camelCase projection of the
//!   routing tree and receivers
//! - **ConfigMap**: Plain `v1` file bundles for anything else
//!
//! # Example
//!
//! ```rust
//! use promforge_core::{Duration, ToYaml};
//! use promforge_operator::{Endpoint, LabelSelector, ServiceMonitor};
//! use promforge_relabel::RelabelRule;
//!
//! let monitor = ServiceMonitor::new("api-metrics", "monitoring")
//!     .with_selector(LabelSelector::match_label("app", "api"))
//!     .with_endpoint(
//!         Endpoint::port("metrics")
//!             .with_interval(Duration::from_secs(15))
//!             .with_relabeling(RelabelRule::rename("__meta_kubernetes_pod_name", "pod")),
//!     );
//!
//! let yaml = monitor.to_yaml()?;
//! assert!(yaml.contains("kind: ServiceMonitor"));
//! assert!(yaml.contains("targetLabel: pod"));
//! # Ok::<(), promforge_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-operator/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alertmanager_config;
pub mod config_map;
pub mod endpoint;
pub mod meta;
pub mod monitor;
pub mod prometheus_rule;
pub mod relabeling;

// Re-export main types at crate root
pub use alertmanager_config::{AlertmanagerConfig, AlertmanagerConfigSpec};
pub use config_map::ConfigMap;
pub use endpoint::{BasicAuth, Endpoint, TlsConfig};
pub use meta::{ObjectMeta, SecretKeySelector};
pub use monitor::{
    LabelSelector, NamespaceSelector, PodMonitor, PodMonitorSpec, ServiceMonitor,
    ServiceMonitorSpec,
};
pub use prometheus_rule::{PrometheusRule, PrometheusRuleSpec};
pub use relabeling::Relabeling;
