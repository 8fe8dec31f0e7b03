//! A ready-made monitoring catalog for Kubernetes clusters.
//!
//! `promforge-catalog` assembles the other promforge crates into the
//! monitoring stack most clusters start from: scrape jobs for the API
//! server, kubelets, cAdvisor, annotated pods and node-exporter; alerts
//! and recording rules over the metrics those jobs collect; a cluster
//! overview dashboard built on the recording rules; and routing that
//! pages on `severity="critical"` while warnings go to chat.
//!
//! Everything is a plain function returning a value. Callers take the
//! pieces they want, adjust them with the builder methods, and serialize
//! with [`promforge_core::ToYaml`].
//!
//! # Features
//!
//! - **Scrape jobs**: the five standard in-cluster jobs, service-account
//!   TLS and relabeling included
//! - **Rules**: node/namespace recording rules and the baseline alert set
//! - **Dashboard**: a cluster overview reading the recording rules
//! - **Assembly**: complete `prometheus.yml`, `alertmanager.yml` and
//!   rule-file values
//!
//! # Example
//!
//! ```rust
//! use promforge_catalog::kubernetes_rule_file;
//! use promforge_core::ToYaml;
//!
//! let yaml = kubernetes_rule_file().to_yaml()?;
//! assert!(yaml.contains("- alert: KubeNodeNotReady"));
//! assert!(yaml.contains("record: instance:node_cpu_utilisation:rate5m"));
//! # Ok::<(), promforge_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-catalog/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alerts;
pub mod assemble;
pub mod dashboards;
pub mod recording;
pub mod scrape;

// Re-export main types at crate root
pub use alerts::kubernetes_alerts;
pub use assemble::{alertmanager_config, kubernetes_rule_file, prometheus_config};
pub use dashboards::cluster_overview;
pub use recording::{namespace_recording_rules, node_recording_rules};
pub use scrape::kubernetes_scrape_configs;
