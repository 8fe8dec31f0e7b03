//! Scrape endpoint settings shared by ServiceMonitor and PodMonitor.

use serde::{Deserialize, Serialize};

use promforge_core::Duration;

use crate::meta::SecretKeySelector;
use crate::relabeling::Relabeling;

/// One scraped port of the selected services or pods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Name of the service or container port to scrape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Metrics path; `/metrics` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Scrape interval for this endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Duration>,
    /// Scheme, `http` or `https`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Per-scrape timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_timeout: Option<Duration>,
    /// Whether scraped labels win conflicts with target labels.
    /// Tri-state: the key appears only when explicitly set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honor_labels: Option<bool>,
    /// Secret key holding the bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token_secret: Option<SecretKeySelector>,
    /// TLS settings for https scrapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
    /// Basic auth credentials as secret references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    /// Target relabeling applied before the scrape.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relabelings: Vec<Relabeling>,
    /// Sample relabeling applied to scraped metrics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metric_relabelings: Vec<Relabeling>,
}

impl Endpoint {
    /// Creates an endpoint scraping the named port.
    #[must_use]
    pub fn port(port: impl Into<String>) -> Self {
        Self {
            port: Some(port.into()),
            ..Self::default()
        }
    }

    /// Sets the metrics path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the scrape interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Sets the scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the per-scrape timeout.
    #[must_use]
    pub fn with_scrape_timeout(mut self, timeout: Duration) -> Self {
        self.scrape_timeout = Some(timeout);
        self
    }

    /// Sets label-conflict behavior explicitly.
    #[must_use]
    pub fn with_honor_labels(mut self, honor: bool) -> Self {
        self.honor_labels = Some(honor);
        self
    }

    /// Reads the bearer token from a secret key.
    #[must_use]
    pub fn with_bearer_token_secret(mut self, selector: SecretKeySelector) -> Self {
        self.bearer_token_secret = Some(selector);
        self
    }

    /// Sets TLS settings.
    #[must_use]
    pub fn with_tls_config(mut self, tls: TlsConfig) -> Self {
        self.tls_config = Some(tls);
        self
    }

    /// Sets basic auth credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Appends a target relabeling step.
    #[must_use]
    pub fn with_relabeling(mut self, relabeling: impl Into<Relabeling>) -> Self {
        self.relabelings.push(relabeling.into());
        self
    }

    /// Appends a sample relabeling step.
    #[must_use]
    pub fn with_metric_relabeling(mut self, relabeling: impl Into<Relabeling>) -> Self {
        self.metric_relabelings.push(relabeling.into());
        self
    }
}

/// Basic auth where both halves are secret references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicAuth {
    /// Secret key holding the username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<SecretKeySelector>,
    /// Secret key holding the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretKeySelector>,
}

impl BasicAuth {
    /// References username and password keys in the same secret.
    #[must_use]
    pub fn from_secret(
        secret: impl Into<String>,
        username_key: impl Into<String>,
        password_key: impl Into<String>,
    ) -> Self {
        let secret = secret.into();
        Self {
            username: Some(SecretKeySelector::new(secret.clone(), username_key)),
            password: Some(SecretKeySelector::new(secret, password_key)),
        }
    }
}

/// TLS settings keyed the way the operator expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    /// Path to the CA bundle validating the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
    /// Path to the client certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,
    /// Path to the client key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    /// Expected server name, when it differs from the scrape address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    /// Whether to skip certificate verification. Tri-state: the key
    /// appears only when explicitly set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_skip_verify: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use promforge_relabel::RelabelRule;

    #[test]
    fn endpoint_keys_are_camel_case() {
        let endpoint = Endpoint::port("metrics")
            .with_interval(Duration::from_secs(30))
            .with_scrape_timeout(Duration::from_secs(10))
            .with_honor_labels(true);

        assert_eq!(
            serde_yaml::to_string(&endpoint).unwrap(),
            "port: metrics\n\
             interval: 30s\n\
             scrapeTimeout: 10s\n\
             honorLabels: true\n"
        );
    }

    #[test]
    fn bearer_token_rides_as_secret_reference() {
        let endpoint = Endpoint::port("https-metrics")
            .with_scheme("https")
            .with_bearer_token_secret(SecretKeySelector::new("scrape-credentials", "token"));

        let yaml = serde_yaml::to_string(&endpoint).unwrap();
        assert!(yaml.contains("bearerTokenSecret:\n"), "{yaml}");
        assert!(yaml.contains("name: scrape-credentials"), "{yaml}");
        assert!(yaml.contains("key: token"), "{yaml}");
    }

    #[test]
    fn relabelings_project_through_into() {
        let endpoint = Endpoint::port("metrics")
            .with_relabeling(RelabelRule::rename("__meta_kubernetes_pod_name", "pod"));

        let yaml = serde_yaml::to_string(&endpoint).unwrap();
        assert!(yaml.contains("relabelings:\n"), "{yaml}");
        assert!(yaml.contains("targetLabel: pod"), "{yaml}");
    }

    #[test]
    fn basic_auth_from_one_secret() {
        let auth = BasicAuth::from_secret("scrape-credentials", "user", "pass");
        assert_eq!(
            serde_yaml::to_string(&auth).unwrap(),
            "username:\n\
             \x20\x20name: scrape-credentials\n\
             \x20\x20key: user\n\
             password:\n\
             \x20\x20name: scrape-credentials\n\
             \x20\x20key: pass\n"
        );
    }
}
