//! Service discovery mechanisms and static target lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use promforge_core::{Duration, Secret};

/// What the Kubernetes discovery watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KubernetesRole {
    /// One target per cluster node.
    Node,
    /// One target per service port.
    Service,
    /// One target per pod container port.
    Pod,
    /// One target per endpoint address.
    Endpoints,
    /// One target per EndpointSlice address.
    EndpointSlice,
    /// One target per ingress path.
    Ingress,
}

/// Namespace filter for Kubernetes discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDiscovery {
    /// Namespaces to watch; all when empty.
    pub names: Vec<String>,
}

/// Discovery of scrape targets from the Kubernetes API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubernetesSdConfig {
    /// The resource kind to discover.
    pub role: KubernetesRole,
    /// API server address; in-cluster configuration when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server: Option<String>,
    /// Namespaces to restrict discovery to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<NamespaceDiscovery>,
}

impl KubernetesSdConfig {
    /// Creates an in-cluster discovery for the given role.
    #[must_use]
    pub const fn new(role: KubernetesRole) -> Self {
        Self {
            role,
            api_server: None,
            namespaces: None,
        }
    }

    /// Sets an explicit API server address.
    #[must_use]
    pub fn with_api_server(mut self, server: impl Into<String>) -> Self {
        self.api_server = Some(server.into());
        self
    }

    /// Restricts discovery to the listed namespaces.
    #[must_use]
    pub fn with_namespaces<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = Some(NamespaceDiscovery {
            names: names.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// Discovery of scrape targets from a Consul catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsulSdConfig {
    /// Consul server address, `host:port`.
    pub server: String,
    /// ACL token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Secret>,
    /// Datacenter; the agent default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    /// Services to watch; all when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    /// Tag filter applied to watched services.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ConsulSdConfig {
    /// Creates a discovery against the given Consul server.
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            token: None,
            datacenter: None,
            services: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the ACL token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<Secret>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the datacenter.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Watches one service.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.services.push(service.into());
        self
    }

    /// Requires a tag on watched services.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// One filter expression for EC2 discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ec2Filter {
    /// The EC2 API filter name, e.g. `tag:Environment`.
    pub name: String,
    /// Accepted values.
    pub values: Vec<String>,
}

/// Discovery of scrape targets from EC2 instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ec2SdConfig {
    /// AWS region.
    pub region: String,
    /// Access key ID; the default credential chain when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    /// Secret access key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<Secret>,
    /// Port scraped on discovered instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Instance filters, ANDed together.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Ec2Filter>,
}

impl Ec2SdConfig {
    /// Creates a discovery in the given region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            access_key: None,
            secret_key: None,
            port: None,
            filters: Vec::new(),
        }
    }

    /// Sets static credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<Secret>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Sets the scraped port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Adds an instance filter.
    #[must_use]
    pub fn with_filter<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Ec2Filter {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// DNS record types usable for discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DnsRecordType {
    /// IPv4 host records.
    A,
    /// IPv6 host records.
    AAAA,
    /// Mail exchange records.
    MX,
    /// Service records carrying their own port.
    SRV,
}

/// Discovery of scrape targets from DNS queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSdConfig {
    /// Names to query.
    pub names: Vec<String>,
    /// Record type; Prometheus defaults to SRV when omitted.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<DnsRecordType>,
    /// Port appended to non-SRV answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl DnsSdConfig {
    /// Creates a discovery over the given query names.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            record_type: None,
            port: None,
        }
    }

    /// Sets the record type.
    #[must_use]
    pub fn with_record_type(mut self, record_type: DnsRecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Sets the target port for host records.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

/// Discovery of scrape targets from JSON/YAML files on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSdConfig {
    /// Glob patterns of target files.
    pub files: Vec<String>,
    /// Re-read interval; the server default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<Duration>,
}

impl FileSdConfig {
    /// Creates a discovery over the given file globs.
    #[must_use]
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            refresh_interval: None,
        }
    }

    /// Sets the re-read interval.
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }
}

/// A fixed list of targets with shared labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticConfig {
    /// Target addresses, `host:port`.
    pub targets: Vec<String>,
    /// Labels attached to every target in the list.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl StaticConfig {
    /// Creates a target list.
    #[must_use]
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            labels: BTreeMap::new(),
        }
    }

    /// Attaches a label to every target.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kubernetes_roles_use_lowercase_wire_names() {
        let yaml = serde_yaml::to_string(&KubernetesRole::EndpointSlice).unwrap();
        assert_eq!(yaml.trim(), "endpointslice");
        let yaml = serde_yaml::to_string(&KubernetesRole::Pod).unwrap();
        assert_eq!(yaml.trim(), "pod");
    }

    #[test]
    fn kubernetes_sd_with_namespaces() {
        let sd = KubernetesSdConfig::new(KubernetesRole::Endpoints)
            .with_namespaces(["monitoring"]);
        assert_eq!(
            serde_yaml::to_string(&sd).unwrap(),
            "role: endpoints\nnamespaces:\n  names:\n  - monitoring\n"
        );
    }

    #[test]
    fn dns_record_types_stay_uppercase() {
        let sd = DnsSdConfig::new(["db.example.com"])
            .with_record_type(DnsRecordType::A)
            .with_port(9100);
        let yaml = serde_yaml::to_string(&sd).unwrap();
        assert!(yaml.contains("type: A"), "{yaml}");
        assert!(yaml.contains("port: 9100"), "{yaml}");
    }

    #[test]
    fn file_sd_renders_refresh_interval_compactly() {
        let sd = FileSdConfig::new(["/etc/prometheus/targets/*.json"])
            .with_refresh_interval(Duration::from_minutes(5));
        assert!(serde_yaml::to_string(&sd).unwrap().contains("refresh_interval: 5m"));
    }

    #[test]
    fn static_config_labels_are_sorted() {
        let sc = StaticConfig::new(["localhost:9090"])
            .with_label("env", "prod")
            .with_label("cluster", "eu-1");
        assert_eq!(
            serde_yaml::to_string(&sc).unwrap(),
            "targets:\n- localhost:9090\nlabels:\n  cluster: eu-1\n  env: prod\n"
        );
    }

    #[test]
    fn consul_token_is_redacted_in_debug_only() {
        let sd = ConsulSdConfig::new("consul.service:8500").with_token("acl-token");
        let debug = format!("{sd:?}");
        assert!(!debug.contains("acl-token"), "{debug}");
        let yaml = serde_yaml::to_string(&sd).unwrap();
        assert!(yaml.contains("token: acl-token"), "{yaml}");
    }

    #[test]
    fn ec2_filters_nest_name_and_values() {
        let sd = Ec2SdConfig::new("eu-west-1")
            .with_port(9100)
            .with_filter("tag:Environment", ["production"]);
        let yaml = serde_yaml::to_string(&sd).unwrap();
        assert!(yaml.contains("- name: tag:Environment"), "{yaml}");
        assert!(yaml.contains("  values:\n  - production"), "{yaml}");
    }
}
