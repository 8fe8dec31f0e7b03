//! Grafana dashboards as code, delivered through Kubernetes.
//!
//! `promforge-grafana` models the slice of Grafana's dashboard JSON that
//! generated dashboards actually use: panels on the 24-column grid,
//! PromQL targets, template variables, and the time window. Dashboards
//! render as two-space pretty JSON and wrap into `ConfigMap`s labeled
//! for the Grafana sidecar, which imports them without any API calls.
//!
//! # Features
//!
//! - **Panels**: `row`, `stat`, and `timeseries` constructors with grid
//!   placement helpers
//! - **Targets**: Rendered PromQL strings with legend templates
//! - **Template variables**: `query` variables for node/namespace pickers
//! - **Sidecar packaging**: `dashboard_config_map` emits the labeled
//!   ConfigMap shape
//!
//! # Example
//!
//! ```rust
//! use promforge_grafana::{dashboard_config_map, Dashboard, Panel, Target};
//!
//! let dashboard = Dashboard::new("Cluster Overview")
//!     .with_uid("cluster-overview")
//!     .with_refresh("30s")
//!     .with_panel(
//!         Panel::timeseries(1, "CPU by node")
//!             .with_target(Target::expr("node:cpu:rate5m").with_legend("{{node}}"))
//!             .with_unit("percentunit"),
//!     );
//!
//! let map = dashboard_config_map("cluster-overview", "monitoring", None, &dashboard)?;
//! assert!(map.data["cluster-overview.json"].contains("\"refresh\": \"30s\""));
//! # Ok::<(), promforge_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-grafana/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config_map;
pub mod dashboard;

// Re-export main types at crate root
pub use config_map::dashboard_config_map;
pub use dashboard::{
    Dashboard, GridPos, Panel, Target, TemplateVar, Templating, TimeWindow, SCHEMA_VERSION,
};
