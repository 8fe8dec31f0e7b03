//! Where the server pushes firing alerts.

use serde::{Deserialize, Serialize};

use promforge_core::Duration;

use crate::discovery::StaticConfig;
use crate::scrape::Scheme;

/// One set of Alertmanager endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertmanagerEndpoints {
    /// Fixed Alertmanager addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_configs: Vec<StaticConfig>,
    /// URL scheme; `http` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<Scheme>,
    /// Prefix for the push path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
    /// Push timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl AlertmanagerEndpoints {
    /// Creates an endpoint set from fixed addresses.
    #[must_use]
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            static_configs: vec![StaticConfig::new(targets)],
            scheme: None,
            path_prefix: None,
            timeout: None,
        }
    }

    /// Sets the URL scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Sets the push path prefix.
    #[must_use]
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Sets the push timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The `alerting` block of a server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Alertmanager endpoint sets, each tried independently.
    pub alertmanagers: Vec<AlertmanagerEndpoints>,
}

impl AlertingConfig {
    /// Creates an empty alerting block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an endpoint set.
    #[must_use]
    pub fn with_alertmanager(mut self, endpoints: AlertmanagerEndpoints) -> Self {
        self.alertmanagers.push(endpoints);
        self
    }
}

#[cfg(test)]
mod tests {
    use promforge_core::ToYaml;

    use super::*;

    #[test]
    fn canonical_shape() {
        let alerting = AlertingConfig::new().with_alertmanager(
            AlertmanagerEndpoints::new(["alertmanager:9093"])
                .with_timeout(Duration::from_secs(10)),
        );
        assert_eq!(
            alerting.to_yaml().unwrap(),
            "alertmanagers:\n- static_configs:\n  - targets:\n    - alertmanager:9093\n  timeout: 10s\n"
        );
    }
}
