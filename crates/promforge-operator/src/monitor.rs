//! ServiceMonitor and PodMonitor custom resources.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::meta::ObjectMeta;

/// Selects objects by exact label values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Labels an object must carry, all of them, with these values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

impl LabelSelector {
    /// Selects objects carrying the given label value.
    #[must_use]
    pub fn match_label(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut match_labels = BTreeMap::new();
        match_labels.insert(name.into(), value.into());
        Self { match_labels }
    }

    /// Adds another required label.
    #[must_use]
    pub fn and_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.match_labels.insert(name.into(), value.into());
        self
    }
}

/// Restricts discovery to namespaces.
///
/// Unset means the resource's own namespace; `any` opens the whole
/// cluster; `match_names` lists namespaces explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSelector {
    /// Whether every namespace is eligible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<bool>,
    /// Explicit list of eligible namespaces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_names: Vec<String>,
}

impl NamespaceSelector {
    /// Discovers in every namespace.
    #[must_use]
    pub fn any() -> Self {
        Self {
            any: Some(true),
            match_names: Vec::new(),
        }
    }

    /// Discovers in the named namespaces only.
    #[must_use]
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            any: None,
            match_names: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// Scrapes the endpoints of services matching a label selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMonitor {
    /// Always `monitoring.coreos.com/v1`.
    pub api_version: String,
    /// Always `ServiceMonitor`.
    pub kind: String,
    /// Name, namespace, labels.
    pub metadata: ObjectMeta,
    /// What to select and how to scrape it.
    pub spec: ServiceMonitorSpec,
}

/// The selector and endpoints of a [`ServiceMonitor`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMonitorSpec {
    /// Which services to scrape.
    pub selector: LabelSelector,
    /// Which namespaces to look in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<NamespaceSelector>,
    /// Service label whose value becomes the `job` label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_label: Option<String>,
    /// Ports to scrape on each selected service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
}

impl ServiceMonitor {
    /// Creates a monitor with an empty selector and no endpoints.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: "monitoring.coreos.com/v1".to_string(),
            kind: "ServiceMonitor".to_string(),
            metadata: ObjectMeta::new(name, namespace),
            spec: ServiceMonitorSpec::default(),
        }
    }

    /// Sets the service selector.
    #[must_use]
    pub fn with_selector(mut self, selector: LabelSelector) -> Self {
        self.spec.selector = selector;
        self
    }

    /// Sets the namespace selector.
    #[must_use]
    pub fn with_namespace_selector(mut self, selector: NamespaceSelector) -> Self {
        self.spec.namespace_selector = Some(selector);
        self
    }

    /// Sets the job label.
    #[must_use]
    pub fn with_job_label(mut self, label: impl Into<String>) -> Self {
        self.spec.job_label = Some(label.into());
        self
    }

    /// Adds a scraped endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.spec.endpoints.push(endpoint);
        self
    }
}

/// Scrapes pods directly, without a fronting service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodMonitor {
    /// Always `monitoring.coreos.com/v1`.
    pub api_version: String,
    /// Always `PodMonitor`.
    pub kind: String,
    /// Name, namespace, labels.
    pub metadata: ObjectMeta,
    /// What to select and how to scrape it.
    pub spec: PodMonitorSpec,
}

/// The selector and endpoints of a [`PodMonitor`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodMonitorSpec {
    /// Which pods to scrape.
    pub selector: LabelSelector,
    /// Which namespaces to look in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<NamespaceSelector>,
    /// Pod label whose value becomes the `job` label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_label: Option<String>,
    /// Container ports to scrape on each selected pod.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pod_metrics_endpoints: Vec<Endpoint>,
}

impl PodMonitor {
    /// Creates a monitor with an empty selector and no endpoints.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: "monitoring.coreos.com/v1".to_string(),
            kind: "PodMonitor".to_string(),
            metadata: ObjectMeta::new(name, namespace),
            spec: PodMonitorSpec::default(),
        }
    }

    /// Sets the pod selector.
    #[must_use]
    pub fn with_selector(mut self, selector: LabelSelector) -> Self {
        self.spec.selector = selector;
        self
    }

    /// Sets the namespace selector.
    #[must_use]
    pub fn with_namespace_selector(mut self, selector: NamespaceSelector) -> Self {
        self.spec.namespace_selector = Some(selector);
        self
    }

    /// Sets the job label.
    #[must_use]
    pub fn with_job_label(mut self, label: impl Into<String>) -> Self {
        self.spec.job_label = Some(label.into());
        self
    }

    /// Adds a scraped endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.spec.pod_metrics_endpoints.push(endpoint);
        self
    }
}
