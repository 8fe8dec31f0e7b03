//! Typed `prometheus.yml` generation.
//!
//! `promforge-prometheus` models the server configuration file: global
//! defaults, scrape jobs with their discovery mechanisms and relabeling
//! pipelines, rule file globs, Alertmanager endpoints, and remote
//! write/read. Everything optional is omitted from the output when unset,
//! so generated files carry only what they actually configure.
//!
//! # Features
//!
//! - **Scrape jobs**: Intervals, paths, schemes, auth, and TLS per job
//! - **Discovery**: Kubernetes, Consul, EC2, DNS, file, and static
//!   targets
//! - **Relabeling**: Target and sample pipelines via `promforge-relabel`
//! - **Remote storage**: Write endpoints with queue tuning, read
//!   endpoints with required matchers
//! - **Tri-state booleans**: `honor_labels`, `insecure_skip_verify`, and
//!   friends emit `false` only when explicitly set
//!
//! # Example
//!
//! ```rust
//! use promforge_core::{Duration, ToYaml};
//! use promforge_prometheus::{
//!     GlobalConfig, KubernetesRole, KubernetesSdConfig, PrometheusConfig, ScrapeConfig,
//! };
//! use promforge_relabel::RelabelRule;
//!
//! let config = PrometheusConfig::new()
//!     .with_global(GlobalConfig::new().with_scrape_interval(Duration::from_secs(15)))
//!     .with_scrape(
//!         ScrapeConfig::new("kubernetes-pods")
//!             .with_kubernetes_sd(KubernetesSdConfig::new(KubernetesRole::Pod))
//!             .with_relabel(RelabelRule::keep_if(
//!                 ["__meta_kubernetes_pod_annotation_prometheus_io_scrape"],
//!                 "true",
//!             )),
//!     );
//!
//! let yaml = config.to_yaml()?;
//! assert!(yaml.contains("role: pod"));
//! # Ok::<(), promforge_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-prometheus/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alerting;
pub mod config;
pub mod discovery;
pub mod http;
pub mod remote;
pub mod scrape;

// Re-export main types at crate root
pub use alerting::{AlertingConfig, AlertmanagerEndpoints};
pub use config::{GlobalConfig, PrometheusConfig};
pub use discovery::{
    ConsulSdConfig, DnsRecordType, DnsSdConfig, Ec2Filter, Ec2SdConfig, FileSdConfig,
    KubernetesRole, KubernetesSdConfig, NamespaceDiscovery, StaticConfig,
};
pub use http::{Authorization, BasicAuth, TlsConfig};
pub use remote::{QueueConfig, RemoteReadConfig, RemoteWriteConfig};
pub use scrape::{Scheme, ScrapeConfig};
