//! Shared wire types for generating Prometheus-ecosystem configuration.
//!
//! `promforge-core` holds the small vocabulary every generated file speaks:
//! durations in Prometheus notation, label matchers in their scalar form,
//! redacting secret wrappers, name validation, and the YAML/JSON projection
//! helpers the rest of the workspace serializes through.
//!
//! # Features
//!
//! - **Durations**: Parse and render `5m`, `1h30m`, `90s` with millisecond
//!   resolution and a canonical `h`/`m`/`s`/`ms` rendering
//! - **Label Matchers**: The `name="value"` scalar form used by
//!   Alertmanager routes and inhibit rules, with all four operators
//! - **Secrets**: Credential values that serialize raw but redact
//!   themselves in `Debug` and `Display` output
//! - **Validation**: Metric, label, and Kubernetes resource name checks
//!   against the Prometheus data model
//! - **Projection**: Blanket [`ToYaml`] / [`ToJsonPretty`] traits so every
//!   entity renders the same way
//!
//! # Example
//!
//! ```rust
//! use promforge_core::{Duration, LabelMatcher, Secret, ToYaml};
//!
//! let scrape_interval: Duration = "90m".parse()?;
//! assert_eq!(scrape_interval.to_string(), "1h30m");
//!
//! let matcher = LabelMatcher::eq("severity", "critical");
//! assert_eq!(matcher.to_string(), "severity=\"critical\"");
//!
//! let token = Secret::new("s3cr3t");
//! assert_eq!(format!("{token}"), "<secret>");
//! assert_eq!(token.to_yaml()?.trim(), "s3cr3t");
//! # Ok::<(), promforge_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-core/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod duration;
pub mod error;
pub mod matcher;
pub mod secret;
pub mod serialize;
pub mod validate;

// Re-export main types at crate root
pub use duration::Duration;
pub use error::{Error, Result};
pub use matcher::{LabelMatcher, MatchOp};
pub use secret::Secret;
pub use serialize::{to_multi_yaml, ToJsonPretty, ToYaml};
pub use validate::{validate_label_name, validate_metric_name, validate_resource_name};
