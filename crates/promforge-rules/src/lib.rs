//! Recording and alerting rule files.
//!
//! `promforge-rules` models the rule files Prometheus loads through
//! `rule_files` globs: groups of recording and alerting rules evaluated
//! together at one interval. Expressions are carried as rendered strings,
//! so rules compose with the expression tree in `promforge-promql` without
//! depending on it.
//!
//! # Features
//!
//! - **Recording rules**: Stored evaluations with extra labels
//! - **Alerting rules**: Sustain windows (`for`), labels, and templated
//!   annotations
//! - **Untagged rule enum**: `record:` and `alert:` discriminate on the
//!   wire, no tag key ever appears
//! - **Groups and files**: Per-group intervals, file-level `groups` list
//!
//! # Example
//!
//! ```rust
//! use promforge_core::{Duration, ToYaml};
//! use promforge_rules::{AlertingRule, RuleFile, RuleGroup};
//!
//! let file = RuleFile::new().with_group(
//!     RuleGroup::new("node.rules").with_rule(
//!         AlertingRule::new("InstanceDown", "up == 0")
//!             .with_for(Duration::from_minutes(5))
//!             .with_label("severity", "page"),
//!     ),
//! );
//!
//! let yaml = file.to_yaml()?;
//! assert!(yaml.contains("- alert: InstanceDown"));
//! assert!(yaml.contains("for: 5m"));
//! # Ok::<(), promforge_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-rules/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod file;
pub mod rule;

// Re-export main types at crate root
pub use file::{RuleFile, RuleGroup};
pub use rule::{AlertingRule, RecordingRule, Rule};
