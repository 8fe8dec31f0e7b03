//! The AlertmanagerConfig custom resource.
//!
//! The spec is the alertmanager.yml routing schema re-keyed to
//! camelCase, with every inline credential replaced by a
//! [`SecretKeySelector`]. Routing and timing semantics are unchanged;
//! see `promforge-alertmanager` for the full description.

use serde::{Deserialize, Serialize};

use promforge_core::{Duration, LabelMatcher};

use crate::meta::{ObjectMeta, SecretKeySelector};

/// Namespaced routing and receivers merged into the cluster Alertmanager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertmanagerConfig {
    /// Always `monitoring.coreos.com/v1alpha1`.
    pub api_version: String,
    /// Always `AlertmanagerConfig`.
    pub kind: String,
    /// Name, namespace, labels.
    pub metadata: ObjectMeta,
    /// The routing tree, receivers, and inhibition rules.
    pub spec: AlertmanagerConfigSpec,
}

/// The routing content of an [`AlertmanagerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertmanagerConfigSpec {
    /// The routing tree root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    /// Receivers routes deliver to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<Receiver>,
    /// Inhibition rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inhibit_rules: Vec<InhibitRule>,
    /// Named time intervals routes reference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mute_time_intervals: Vec<MuteTimeInterval>,
}

impl AlertmanagerConfig {
    /// Creates a resource with an empty spec.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: "monitoring.coreos.com/v1alpha1".to_string(),
            kind: "AlertmanagerConfig".to_string(),
            metadata: ObjectMeta::new(name, namespace),
            spec: AlertmanagerConfigSpec::default(),
        }
    }

    /// Sets the routing tree root.
    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.spec.route = Some(route);
        self
    }

    /// Adds a receiver.
    #[must_use]
    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.spec.receivers.push(receiver);
        self
    }

    /// Adds an inhibition rule.
    #[must_use]
    pub fn with_inhibit_rule(mut self, rule: InhibitRule) -> Self {
        self.spec.inhibit_rules.push(rule);
        self
    }

    /// Adds a named time interval.
    #[must_use]
    pub fn with_mute_time_interval(mut self, interval: MuteTimeInterval) -> Self {
        self.spec.mute_time_intervals.push(interval);
        self
    }
}

/// One routing node, camelCase keyed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Receiver alerts matching this node deliver to.
    pub receiver: String,
    /// Labels alerts are grouped by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    /// Delay before a new group's first notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_wait: Option<Duration>,
    /// Spacing between notifications of a growing group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_interval: Option<Duration>,
    /// Re-notification spacing for unchanged groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<Duration>,
    /// Matchers, all of which must hold; scalar `k OP "v"` strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matchers: Vec<LabelMatcher>,
    /// Whether later siblings are still evaluated after this node
    /// matches. Tri-state: the key appears only when explicitly set.
    #[serde(rename = "continue", default, skip_serializing_if = "Option::is_none")]
    pub continue_: Option<bool>,
    /// Child routes, evaluated in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    /// Names of time intervals during which this route is silent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mute_time_intervals: Vec<String>,
    /// Names of time intervals outside which this route is silent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_time_intervals: Vec<String>,
}

impl Route {
    /// Creates a route delivering to the given receiver.
    #[must_use]
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            ..Self::default()
        }
    }

    /// Sets the grouping labels.
    #[must_use]
    pub fn with_group_by<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the delay before a new group's first notification.
    #[must_use]
    pub fn with_group_wait(mut self, wait: Duration) -> Self {
        self.group_wait = Some(wait);
        self
    }

    /// Sets the spacing between notifications of a growing group.
    #[must_use]
    pub fn with_group_interval(mut self, interval: Duration) -> Self {
        self.group_interval = Some(interval);
        self
    }

    /// Sets the re-notification spacing for unchanged groups.
    #[must_use]
    pub fn with_repeat_interval(mut self, interval: Duration) -> Self {
        self.repeat_interval = Some(interval);
        self
    }

    /// Appends a matcher.
    #[must_use]
    pub fn with_matcher(mut self, matcher: LabelMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Sets sibling-continuation behavior explicitly.
    #[must_use]
    pub fn with_continue(mut self, continue_: bool) -> Self {
        self.continue_ = Some(continue_);
        self
    }

    /// Appends a child route.
    #[must_use]
    pub fn with_route(mut self, child: Route) -> Self {
        self.routes.push(child);
        self
    }
}

/// A named bundle of notification channels, camelCase keyed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receiver {
    /// The name routes reference.
    pub name: String,
    /// Email deliveries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_configs: Vec<EmailConfig>,
    /// Slack messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slack_configs: Vec<SlackConfig>,
    /// PagerDuty events.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pagerduty_configs: Vec<PagerdutyConfig>,
    /// Generic webhook posts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_configs: Vec<WebhookConfig>,
    /// Opsgenie alerts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opsgenie_configs: Vec<OpsgenieConfig>,
}

impl Receiver {
    /// Creates a receiver with no channels.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an email channel.
    #[must_use]
    pub fn with_email(mut self, config: EmailConfig) -> Self {
        self.email_configs.push(config);
        self
    }

    /// Adds a Slack channel.
    #[must_use]
    pub fn with_slack(mut self, config: SlackConfig) -> Self {
        self.slack_configs.push(config);
        self
    }

    /// Adds a PagerDuty channel.
    #[must_use]
    pub fn with_pagerduty(mut self, config: PagerdutyConfig) -> Self {
        self.pagerduty_configs.push(config);
        self
    }

    /// Adds a webhook channel.
    #[must_use]
    pub fn with_webhook(mut self, config: WebhookConfig) -> Self {
        self.webhook_configs.push(config);
        self
    }

    /// Adds an Opsgenie channel.
    #[must_use]
    pub fn with_opsgenie(mut self, config: OpsgenieConfig) -> Self {
        self.opsgenie_configs.push(config);
        self
    }
}

/// Email delivery with the password as a secret reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    /// Whether a notification is sent when the alert resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// Recipient address.
    pub to: String,
    /// Sender address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// SMTP relay, `host:port`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smarthost: Option<String>,
    /// SMTP auth username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    /// Secret key holding the SMTP password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<SecretKeySelector>,
    /// Whether STARTTLS is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_tls: Option<bool>,
    /// HTML body template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Plain-text body template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EmailConfig {
    /// Creates a delivery to the given address.
    #[must_use]
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            send_resolved: None,
            to: to.into(),
            from: None,
            smarthost: None,
            auth_username: None,
            auth_password: None,
            require_tls: None,
            html: None,
            text: None,
        }
    }

    /// Sets resolve-notification behavior explicitly.
    #[must_use]
    pub fn with_send_resolved(mut self, send: bool) -> Self {
        self.send_resolved = Some(send);
        self
    }

    /// Reads the SMTP password from a secret key.
    #[must_use]
    pub fn with_auth(
        mut self,
        username: impl Into<String>,
        password: SecretKeySelector,
    ) -> Self {
        self.auth_username = Some(username.into());
        self.auth_password = Some(password);
        self
    }
}

/// Slack message with the webhook URL as a secret reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfig {
    /// Whether a notification is sent when the alert resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// Secret key holding the webhook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<SecretKeySelector>,
    /// Target channel, `#name` or `@user`.
    pub channel: String,
    /// Bot display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Attachment color; templates allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Message title template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Message body template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SlackConfig {
    /// Creates a message to the given channel.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            send_resolved: None,
            api_url: None,
            channel: channel.into(),
            username: None,
            color: None,
            title: None,
            text: None,
        }
    }

    /// Sets resolve-notification behavior explicitly.
    #[must_use]
    pub fn with_send_resolved(mut self, send: bool) -> Self {
        self.send_resolved = Some(send);
        self
    }

    /// Reads the webhook URL from a secret key.
    #[must_use]
    pub fn with_api_url(mut self, selector: SecretKeySelector) -> Self {
        self.api_url = Some(selector);
        self
    }
}

/// PagerDuty event with integration keys as secret references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerdutyConfig {
    /// Whether a notification is sent when the alert resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// Secret key holding the Events API v2 integration key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<SecretKeySelector>,
    /// Secret key holding the legacy v1 integration key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<SecretKeySelector>,
    /// API endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Client identifier shown in the incident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Backlink shown in the incident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_url: Option<String>,
    /// Incident description template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Event severity template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl PagerdutyConfig {
    /// Creates an Events API v2 integration.
    #[must_use]
    pub fn routing_key(selector: SecretKeySelector) -> Self {
        Self {
            routing_key: Some(selector),
            ..Self::default()
        }
    }

    /// Creates a legacy v1 integration.
    #[must_use]
    pub fn service_key(selector: SecretKeySelector) -> Self {
        Self {
            service_key: Some(selector),
            ..Self::default()
        }
    }

    /// Sets resolve-notification behavior explicitly.
    #[must_use]
    pub fn with_send_resolved(mut self, send: bool) -> Self {
        self.send_resolved = Some(send);
        self
    }

    /// Sets the event severity template.
    #[must_use]
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }
}

/// Webhook post; secret-bearing URLs ride as a reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    /// Whether a notification is sent when the alert resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// Plain endpoint URL, for URLs carrying no credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Secret key holding the endpoint URL. Set this or `url`, not both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_secret: Option<SecretKeySelector>,
    /// Cap on alerts per payload; 0 means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_alerts: Option<u32>,
}

impl WebhookConfig {
    /// Posts to a plain, credential-free URL.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Posts to a URL read from a secret key.
    #[must_use]
    pub fn url_secret(selector: SecretKeySelector) -> Self {
        Self {
            url_secret: Some(selector),
            ..Self::default()
        }
    }

    /// Sets resolve-notification behavior explicitly.
    #[must_use]
    pub fn with_send_resolved(mut self, send: bool) -> Self {
        self.send_resolved = Some(send);
        self
    }

    /// Caps the number of alerts per payload.
    #[must_use]
    pub fn with_max_alerts(mut self, max: u32) -> Self {
        self.max_alerts = Some(max);
        self
    }
}

/// Opsgenie alert with the API key as a secret reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpsgenieConfig {
    /// Whether a notification is sent when the alert resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// Secret key holding the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretKeySelector>,
    /// API endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Alert message template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Alert description template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority template, `P1` through `P5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl OpsgenieConfig {
    /// Creates a channel inheriting the cluster's API settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets resolve-notification behavior explicitly.
    #[must_use]
    pub fn with_send_resolved(mut self, send: bool) -> Self {
        self.send_resolved = Some(send);
        self
    }

    /// Reads the API key from a secret key.
    #[must_use]
    pub fn with_api_key(mut self, selector: SecretKeySelector) -> Self {
        self.api_key = Some(selector);
        self
    }

    /// Sets the priority template.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Inhibition rule, camelCase keyed; matchers stay scalar strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InhibitRule {
    /// Matchers the firing (inhibiting) alert must satisfy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_matchers: Vec<LabelMatcher>,
    /// Matchers the muted (inhibited) alert must satisfy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_matchers: Vec<LabelMatcher>,
    /// Labels that must carry the same value on both alerts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equal: Vec<String>,
}

impl InhibitRule {
    /// Creates an empty rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a matcher for the inhibiting alert.
    #[must_use]
    pub fn with_source(mut self, matcher: LabelMatcher) -> Self {
        self.source_matchers.push(matcher);
        self
    }

    /// Adds a matcher for the inhibited alert.
    #[must_use]
    pub fn with_target(mut self, matcher: LabelMatcher) -> Self {
        self.target_matchers.push(matcher);
        self
    }

    /// Requires a label to agree between the two alerts.
    #[must_use]
    pub fn with_equal(mut self, label: impl Into<String>) -> Self {
        self.equal.push(label.into());
        self
    }
}

/// A named set of time intervals, camelCase keyed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteTimeInterval {
    /// The name routes reference.
    pub name: String,
    /// The intervals; the name matches when any of them does.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_intervals: Vec<TimeInterval>,
}

impl MuteTimeInterval {
    /// Creates a named set with no intervals.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time_intervals: Vec::new(),
        }
    }

    /// Adds an interval.
    #[must_use]
    pub fn with_interval(mut self, interval: TimeInterval) -> Self {
        self.time_intervals.push(interval);
        self
    }
}

/// One interval; all set fields must match simultaneously.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    /// In-day ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub times: Vec<TimeRange>,
    /// Weekday names or ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<String>,
    /// Days of the month; negative values count from the end.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_month: Vec<String>,
    /// Month names or numbers, single or ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<String>,
    /// Years, single or ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub years: Vec<String>,
    /// IANA time zone the interval is evaluated in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// An in-day range, camelCase keyed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    /// Start of the range, `HH:MM`, inclusive.
    pub start_time: String,
    /// End of the range, `HH:MM`, exclusive.
    pub end_time: String,
}
