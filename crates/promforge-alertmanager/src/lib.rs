//! Typed `alertmanager.yml` generation.
//!
//! `promforge-alertmanager` models the Alertmanager configuration file:
//! the routing tree, receivers with their notification channels,
//! inhibition rules, and time intervals. Matchers reuse the core
//! [`LabelMatcher`](promforge_core::LabelMatcher) wire form and
//! credentials ride in [`Secret`](promforge_core::Secret), so routing
//! YAML and redaction behave the same here as everywhere else.
//!
//! # Features
//!
//! - **Routing tree**: Pre-order traversal, conjunctive matchers,
//!   inherited grouping and timing, explicit `continue`
//! - **Receivers**: Email, Slack, PagerDuty, webhook, and Opsgenie
//!   channels with tri-state `send_resolved`
//! - **Inhibition**: Source/target matcher pairs with `equal` labels
//! - **Time intervals**: Named mute/active windows referenced by routes
//!
//! # Example
//!
//! ```rust
//! use promforge_alertmanager::{AlertmanagerConfig, Receiver, Route, SlackConfig};
//! use promforge_core::{LabelMatcher, ToYaml};
//!
//! let config = AlertmanagerConfig::new(
//!     Route::new("slack-default")
//!         .with_group_by(["alertname", "cluster"])
//!         .with_route(
//!             Route::new("slack-infra").with_matcher(LabelMatcher::eq("team", "infra")),
//!         ),
//! )
//! .with_receiver(Receiver::new("slack-default").with_slack(SlackConfig::new("#alerts")))
//! .with_receiver(Receiver::new("slack-infra").with_slack(SlackConfig::new("#infra")));
//!
//! let yaml = config.to_yaml()?;
//! assert!(yaml.contains("team=\"infra\""));
//! # Ok::<(), promforge_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/promforge-alertmanager/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod inhibit;
pub mod receiver;
pub mod route;
pub mod time_interval;

// Re-export main types at crate root
pub use config::{AlertmanagerConfig, GlobalConfig};
pub use inhibit::InhibitRule;
pub use receiver::{
    EmailConfig, OpsgenieConfig, PagerdutyConfig, Receiver, SlackConfig, WebhookConfig,
};
pub use route::Route;
pub use time_interval::{MuteTimeInterval, TimeInterval, TimeRange};
