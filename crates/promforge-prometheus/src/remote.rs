//! Remote write and remote read endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use promforge_core::Duration;
use promforge_relabel::RelabelRule;

use crate::http::{BasicAuth, TlsConfig};

/// Tuning for the remote-write shard queues.
///
/// Every field is optional; the server defaults apply field-by-field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Samples buffered per shard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Upper bound on shard count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shards: Option<u32>,
    /// Lower bound on shard count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_shards: Option<u32>,
    /// Samples per outgoing request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_samples_per_send: Option<u32>,
    /// Flush deadline for an unfilled batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_send_deadline: Option<Duration>,
    /// Initial retry backoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_backoff: Option<Duration>,
    /// Retry backoff ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_backoff: Option<Duration>,
}

/// One remote-write endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteWriteConfig {
    /// The write endpoint URL.
    pub url: String,
    /// Request timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_timeout: Option<Duration>,
    /// Extra headers sent with every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Relabeling applied to samples before sending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub write_relabel_configs: Vec<RelabelRule>,
    /// Basic-auth credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    /// TLS settings for the connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
    /// Shard queue tuning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_config: Option<QueueConfig>,
}

impl RemoteWriteConfig {
    /// Creates a write endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            remote_timeout: None,
            headers: BTreeMap::new(),
            write_relabel_configs: Vec::new(),
            basic_auth: None,
            tls_config: None,
            queue_config: None,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = Some(timeout);
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Appends a pre-send relabeling rule.
    #[must_use]
    pub fn with_write_relabel(mut self, rule: RelabelRule) -> Self {
        self.write_relabel_configs.push(rule);
        self
    }

    /// Sets basic-auth credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Sets TLS settings.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls_config = Some(tls);
        self
    }

    /// Sets queue tuning.
    #[must_use]
    pub fn with_queue_config(mut self, queue: QueueConfig) -> Self {
        self.queue_config = Some(queue);
        self
    }
}

/// One remote-read endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReadConfig {
    /// The read endpoint URL.
    pub url: String,
    /// Request timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_timeout: Option<Duration>,
    /// Extra headers sent with every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Basic-auth credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    /// TLS settings for the connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
    /// Whether to read the span local storage already covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_recent: Option<bool>,
    /// Equality matchers a query must carry to be forwarded.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub required_matchers: BTreeMap<String, String>,
}

impl RemoteReadConfig {
    /// Creates a read endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            remote_timeout: None,
            headers: BTreeMap::new(),
            basic_auth: None,
            tls_config: None,
            read_recent: None,
            required_matchers: BTreeMap::new(),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = Some(timeout);
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets basic-auth credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Sets TLS settings.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls_config = Some(tls);
        self
    }

    /// Sets recent-span behavior explicitly.
    #[must_use]
    pub fn with_read_recent(mut self, read_recent: bool) -> Self {
        self.read_recent = Some(read_recent);
        self
    }

    /// Requires an equality matcher on forwarded queries.
    #[must_use]
    pub fn with_required_matcher(
        mut self,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.required_matchers.insert(label.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use promforge_core::ToYaml;

    use super::*;

    #[test]
    fn write_endpoint_minimal() {
        assert_eq!(
            RemoteWriteConfig::new("https://mimir.example.com/api/v1/push")
                .to_yaml()
                .unwrap(),
            "url: https://mimir.example.com/api/v1/push\n"
        );
    }

    #[test]
    fn queue_config_emits_only_set_fields() {
        let rw = RemoteWriteConfig::new("https://cortex.example.com/push").with_queue_config(
            QueueConfig {
                max_shards: Some(30),
                batch_send_deadline: Some(Duration::from_secs(5)),
                ..QueueConfig::default()
            },
        );
        let yaml = rw.to_yaml().unwrap();
        assert!(yaml.contains("queue_config:\n  max_shards: 30\n  batch_send_deadline: 5s"), "{yaml}");
        assert!(!yaml.contains("capacity"), "{yaml}");
    }

    #[test]
    fn write_relabel_drops_high_cardinality_series() {
        let rw = RemoteWriteConfig::new("https://cortex.example.com/push")
            .with_write_relabel(RelabelRule::drop_if(["__name__"], "go_gc_duration_seconds.*"));
        let yaml = rw.to_yaml().unwrap();
        assert!(yaml.contains("write_relabel_configs:"), "{yaml}");
        assert!(yaml.contains("action: drop"), "{yaml}");
    }

    #[test]
    fn read_recent_false_is_explicit() {
        let rr = RemoteReadConfig::new("https://thanos.example.com/api/v1/read")
            .with_read_recent(false)
            .with_required_matcher("cluster", "eu-1");
        let yaml = rr.to_yaml().unwrap();
        assert!(yaml.contains("read_recent: false"), "{yaml}");
        assert!(yaml.contains("required_matchers:\n  cluster: eu-1"), "{yaml}");
    }

    #[test]
    fn round_trips_through_yaml() {
        let rw = RemoteWriteConfig::new("https://mimir.example.com/api/v1/push")
            .with_remote_timeout(Duration::from_secs(30))
            .with_header("X-Scope-OrgID", "tenant-a")
            .with_basic_auth(BasicAuth::new("writer").with_password("w"));
        let yaml = rw.to_yaml().unwrap();
        let parsed: RemoteWriteConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, rw);
    }
}
