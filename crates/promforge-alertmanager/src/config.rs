//! The top-level alertmanager.yml document.

use serde::{Deserialize, Serialize};

use promforge_core::{Duration, Secret};

use crate::inhibit::InhibitRule;
use crate::receiver::Receiver;
use crate::route::Route;
use crate::time_interval::MuteTimeInterval;

/// Defaults channels inherit when their own fields are unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// How long to wait before declaring an alert resolved when it
    /// stops arriving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_timeout: Option<Duration>,
    /// Default SMTP relay, `host:port`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_smarthost: Option<String>,
    /// Default sender address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_from: Option<String>,
    /// Default SMTP auth username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_auth_username: Option<String>,
    /// Default SMTP auth password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_auth_password: Option<Secret>,
    /// Default STARTTLS behavior. Tri-state: the key appears only when
    /// explicitly set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_require_tls: Option<bool>,
    /// Default Slack webhook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_api_url: Option<Secret>,
    /// Default PagerDuty API endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagerduty_url: Option<String>,
    /// Default Opsgenie API endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opsgenie_api_url: Option<String>,
    /// Default Opsgenie API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opsgenie_api_key: Option<Secret>,
}

impl GlobalConfig {
    /// Creates empty defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resolve timeout.
    #[must_use]
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = Some(timeout);
        self
    }

    /// Sets the default SMTP relay and sender.
    #[must_use]
    pub fn with_smtp(
        mut self,
        smarthost: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        self.smtp_smarthost = Some(smarthost.into());
        self.smtp_from = Some(from.into());
        self
    }

    /// Sets default SMTP credentials.
    #[must_use]
    pub fn with_smtp_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<Secret>,
    ) -> Self {
        self.smtp_auth_username = Some(username.into());
        self.smtp_auth_password = Some(password.into());
        self
    }

    /// Sets the default Slack webhook URL.
    #[must_use]
    pub fn with_slack_api_url(mut self, url: impl Into<Secret>) -> Self {
        self.slack_api_url = Some(url.into());
        self
    }

    /// Sets the default Opsgenie API key.
    #[must_use]
    pub fn with_opsgenie_api_key(mut self, key: impl Into<Secret>) -> Self {
        self.opsgenie_api_key = Some(key.into());
        self
    }
}

/// The alertmanager.yml document.
///
/// Every receiver a route names must exist in `receivers`; Alertmanager
/// itself rejects the file otherwise, so keep the two in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertmanagerConfig {
    /// Channel defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalConfig>,
    /// The routing tree root.
    pub route: Route,
    /// All receivers routes may deliver to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<Receiver>,
    /// Inhibition rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inhibit_rules: Vec<InhibitRule>,
    /// Named time intervals routes reference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mute_time_intervals: Vec<MuteTimeInterval>,
    /// Glob patterns for notification template files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<String>,
}

impl AlertmanagerConfig {
    /// Creates a document with the given routing tree root.
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            global: None,
            route,
            receivers: Vec::new(),
            inhibit_rules: Vec::new(),
            mute_time_intervals: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Sets channel defaults.
    #[must_use]
    pub fn with_global(mut self, global: GlobalConfig) -> Self {
        self.global = Some(global);
        self
    }

    /// Adds a receiver.
    #[must_use]
    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receivers.push(receiver);
        self
    }

    /// Adds an inhibition rule.
    #[must_use]
    pub fn with_inhibit_rule(mut self, rule: InhibitRule) -> Self {
        self.inhibit_rules.push(rule);
        self
    }

    /// Adds a named time interval.
    #[must_use]
    pub fn with_mute_time_interval(mut self, interval: MuteTimeInterval) -> Self {
        self.mute_time_intervals.push(interval);
        self
    }

    /// Adds a template file glob.
    #[must_use]
    pub fn with_template(mut self, pattern: impl Into<String>) -> Self {
        self.templates.push(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiver::{SlackConfig, WebhookConfig};
    use promforge_core::LabelMatcher;

    fn sample_config() -> AlertmanagerConfig {
        let route = Route::new("default")
            .with_group_by(["alertname"])
            .with_group_wait("30s".parse().unwrap())
            .with_route(
                Route::new("slack-infra")
                    .with_matcher(LabelMatcher::eq("team", "infra")),
            );

        AlertmanagerConfig::new(route)
            .with_global(GlobalConfig::new().with_resolve_timeout("5m".parse().unwrap()))
            .with_receiver(Receiver::new("default").with_webhook(WebhookConfig::new(
                "https://hooks.example.com/default",
            )))
            .with_receiver(Receiver::new("slack-infra").with_slack(SlackConfig::new("#infra")))
    }

    // =========================================================================
    // Document shape
    // =========================================================================

    #[test]
    fn document_keys_follow_declaration_order() {
        let yaml = serde_yaml::to_string(&sample_config()).unwrap();
        let global = yaml.find("global:").unwrap();
        let route = yaml.find("route:").unwrap();
        let receivers = yaml.find("receivers:").unwrap();
        assert!(global < route && route < receivers, "{yaml}");
    }

    #[test]
    fn minimal_document_omits_optional_sections() {
        let config = AlertmanagerConfig::new(Route::new("noop"))
            .with_receiver(Receiver::new("noop"));
        assert_eq!(
            serde_yaml::to_string(&config).unwrap(),
            "route:\n\
             \x20\x20receiver: noop\n\
             receivers:\n\
             - name: noop\n"
        );
    }

    #[test]
    fn document_round_trips_through_yaml() {
        let config = sample_config();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AlertmanagerConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    // =========================================================================
    // Global defaults
    // =========================================================================

    #[test]
    fn smtp_auth_sets_username_and_password() {
        let global = GlobalConfig::new()
            .with_smtp("smtp.example.com:587", "alerts@example.com")
            .with_smtp_auth("mailer", "hunter2");
        let yaml = serde_yaml::to_string(&global).unwrap();
        assert!(yaml.contains("smtp_smarthost: smtp.example.com:587"), "{yaml}");
        assert!(yaml.contains("smtp_auth_username: mailer"), "{yaml}");
        assert!(yaml.contains("smtp_auth_password: hunter2"), "{yaml}");
    }

    #[test]
    fn global_secrets_redact_in_debug() {
        let global = GlobalConfig::new()
            .with_slack_api_url("https://hooks.slack.com/services/T0/B0/tok");
        assert!(!format!("{global:?}").contains("tok"), "{global:?}");
    }
}
