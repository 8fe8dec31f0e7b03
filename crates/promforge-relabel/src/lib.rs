//! Typed relabeling rules for Prometheus scrape and metric pipelines.
//!
//! `promforge-relabel` models the `relabel_configs` / `metric_relabel_configs`
//! entries of a scrape configuration. A rule is a flat mapping with a
//! stable key order; helper constructors encode the common idioms so the
//! easy-to-get-wrong shapes (hashmod sharding, labelmap promotion, meta
//! label handling) are built correctly every time.
//!
//! # Features
//!
//! - **Actions**: The full action set, serialized in Prometheus's
//!   lowercase wire form
//! - **Minimal output**: Unset fields are omitted, so emitted rules carry
//!   only what they configure
//! - **Helpers**: `keep_if`, `drop_if`, `rename`, `from_meta`, `hashmod`,
//!   `labelmap`, `label_drop`, `label_keep`, `replace`
//! - **Sanitizer**: Annotation-style names rewritten to valid label names
//!
//! # Example
//!
//! ```rust
//! use promforge_relabel::RelabelRule;
//!
//! let shard = RelabelRule::hashmod(["__address__"], 4, "__tmp_shard");
//! let keep = RelabelRule::keep_if(["__tmp_shard"], "0");
//!
//! let yaml = serde_yaml::to_string(&[shard, keep])?;
//! assert!(yaml.contains("action: hashmod"));
//! assert!(yaml.contains("modulus: 4"));
//! # Ok::<(), serde_yaml::Error>(())
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-relabel/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod action;
pub mod rule;

// Re-export main types at crate root
pub use action::RelabelAction;
pub use rule::{sanitize_label_name, RelabelRule};
