//! Receivers and their notification channels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use promforge_core::Secret;

/// A named bundle of notification channels.
///
/// Routes deliver to receivers by name; a receiver with no channels is
/// a blackhole, which is the idiomatic way to drop alerts on purpose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
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

/// Email delivery settings.
///
/// Connection fields unset here fall back to the `smtp_*` globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether a notification is sent when the alert resolves.
    /// Tri-state: the key appears only when explicitly set.
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
    /// SMTP auth password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<Secret>,
    /// Whether STARTTLS is required. Tri-state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_tls: Option<bool>,
    /// Extra message headers.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
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
            headers: BTreeMap::new(),
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

    /// Sets the sender address.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Sets the SMTP relay.
    #[must_use]
    pub fn with_smarthost(mut self, smarthost: impl Into<String>) -> Self {
        self.smarthost = Some(smarthost.into());
        self
    }

    /// Sets SMTP credentials.
    #[must_use]
    pub fn with_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<Secret>,
    ) -> Self {
        self.auth_username = Some(username.into());
        self.auth_password = Some(password.into());
        self
    }

    /// Sets STARTTLS behavior explicitly.
    #[must_use]
    pub fn with_require_tls(mut self, require: bool) -> Self {
        self.require_tls = Some(require);
        self
    }

    /// Adds a message header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Slack message settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Whether a notification is sent when the alert resolves.
    /// Tri-state: the key appears only when explicitly set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// Webhook URL; the `slack_api_url` global when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Secret>,
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
    /// Bot icon emoji.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
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
            icon_emoji: None,
        }
    }

    /// Sets resolve-notification behavior explicitly.
    #[must_use]
    pub fn with_send_resolved(mut self, send: bool) -> Self {
        self.send_resolved = Some(send);
        self
    }

    /// Sets a per-channel webhook URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<Secret>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the bot display name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the attachment color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the title template.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the body template.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the bot icon emoji.
    #[must_use]
    pub fn with_icon_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(emoji.into());
        self
    }
}

/// PagerDuty event settings.
///
/// Exactly one of `routing_key` (Events API v2) or `service_key`
/// (legacy v1) should be set; the constructors enforce the choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagerdutyConfig {
    /// Whether a notification is sent when the alert resolves.
    /// Tri-state: the key appears only when explicitly set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// Events API v2 integration key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<Secret>,
    /// Legacy v1 integration key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<Secret>,
    /// API endpoint; the `pagerduty_url` global when unset.
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
    pub fn routing_key(key: impl Into<Secret>) -> Self {
        Self {
            routing_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Creates a legacy v1 integration.
    #[must_use]
    pub fn service_key(key: impl Into<Secret>) -> Self {
        Self {
            service_key: Some(key.into()),
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

    /// Sets the incident description template.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Generic webhook settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Whether a notification is sent when the alert resolves.
    /// Tri-state: the key appears only when explicitly set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// Endpoint receiving the JSON payload. Webhook URLs routinely embed
    /// tokens, so the whole URL is secret.
    pub url: Secret,
    /// Cap on alerts per payload; 0 means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_alerts: Option<u32>,
}

impl WebhookConfig {
    /// Creates a webhook post to the given URL.
    #[must_use]
    pub fn new(url: impl Into<Secret>) -> Self {
        Self {
            send_resolved: None,
            url: url.into(),
            max_alerts: None,
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

/// Opsgenie alert settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpsgenieConfig {
    /// Whether a notification is sent when the alert resolves.
    /// Tri-state: the key appears only when explicitly set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    /// API key; the `opsgenie_api_key` global when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Secret>,
    /// API endpoint; the `opsgenie_api_url` global when unset.
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
    /// Creates a channel inheriting the global API settings.
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

    /// Sets a per-channel API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<Secret>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the message template.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the priority template.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_receiver_is_a_blackhole() {
        assert_eq!(
            serde_yaml::to_string(&Receiver::new("blackhole")).unwrap(),
            "name: blackhole\n"
        );
    }

    #[test]
    fn send_resolved_tri_state() {
        let unset = serde_yaml::to_string(&WebhookConfig::new("https://hook.example.com")).unwrap();
        assert!(!unset.contains("send_resolved"), "{unset}");

        let explicit_false = serde_yaml::to_string(
            &WebhookConfig::new("https://hook.example.com").with_send_resolved(false),
        )
        .unwrap();
        assert!(explicit_false.contains("send_resolved: false"), "{explicit_false}");
    }

    #[test]
    fn webhook_url_is_secret_but_serializes_raw() {
        let config = WebhookConfig::new("https://hooks.example.com/T000/B000/tok");
        assert!(!format!("{config:?}").contains("tok"), "{config:?}");
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("url: https://hooks.example.com/T000/B000/tok"), "{yaml}");
    }

    #[test]
    fn pagerduty_constructors_pick_one_key() {
        let v2 = PagerdutyConfig::routing_key("rk");
        assert!(v2.routing_key.is_some() && v2.service_key.is_none());

        let v1 = PagerdutyConfig::service_key("sk");
        assert!(v1.service_key.is_some() && v1.routing_key.is_none());

        let yaml = serde_yaml::to_string(&v2.with_severity("critical")).unwrap();
        assert_eq!(yaml, "routing_key: rk\nseverity: critical\n");
    }

    #[test]
    fn slack_channel_round_trips() {
        let config = SlackConfig::new("#alerts")
            .with_send_resolved(true)
            .with_username("alertmanager")
            .with_title("{{ .CommonAnnotations.summary }}");
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: SlackConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn email_auth_sets_both_fields() {
        let config = EmailConfig::new("oncall@example.com")
            .with_smarthost("smtp.example.com:587")
            .with_auth("mailer", "hunter2")
            .with_require_tls(true);
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("auth_username: mailer"), "{yaml}");
        assert!(yaml.contains("auth_password: hunter2"), "{yaml}");
        assert!(yaml.contains("require_tls: true"), "{yaml}");
    }
}
