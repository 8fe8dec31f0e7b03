//! The PrometheusRule custom resource.

use serde::{Deserialize, Serialize};

use promforge_rules::RuleGroup;

use crate::meta::ObjectMeta;

/// Recording and alerting rules delivered through the operator.
///
/// The spec holds ordinary [`RuleGroup`]s: the rule-file keys are
/// already the CRD keys, so groups move between standalone rule files
/// and this resource without translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusRule {
    /// Always `monitoring.coreos.com/v1`.
    pub api_version: String,
    /// Always `PrometheusRule`.
    pub kind: String,
    /// Name, namespace, labels.
    pub metadata: ObjectMeta,
    /// The rule groups.
    pub spec: PrometheusRuleSpec,
}

/// The rule groups of a [`PrometheusRule`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrometheusRuleSpec {
    /// Groups, evaluated in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<RuleGroup>,
}

impl PrometheusRule {
    /// Creates a resource with no groups.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: "monitoring.coreos.com/v1".to_string(),
            kind: "PrometheusRule".to_string(),
            metadata: ObjectMeta::new(name, namespace),
            spec: PrometheusRuleSpec::default(),
        }
    }

    /// Adds a rule group.
    #[must_use]
    pub fn with_group(mut self, group: RuleGroup) -> Self {
        self.spec.groups.push(group);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promforge_rules::{AlertingRule, RecordingRule};

    #[test]
    fn rule_file_keys_pass_through_unchanged() {
        let resource = PrometheusRule::new("api-rules", "monitoring").with_group(
            RuleGroup::new("api.rules")
                .with_rule(AlertingRule::new("HighErrorRate", "error_ratio > 0.05")),
        );

        assert_eq!(
            serde_yaml::to_string(&resource).unwrap(),
            "apiVersion: monitoring.coreos.com/v1\n\
             kind: PrometheusRule\n\
             metadata:\n\
             \x20\x20name: api-rules\n\
             \x20\x20namespace: monitoring\n\
             spec:\n\
             \x20\x20groups:\n\
             \x20\x20- name: api.rules\n\
             \x20\x20\x20\x20rules:\n\
             \x20\x20\x20\x20- alert: HighErrorRate\n\
             \x20\x20\x20\x20\x20\x20expr: error_ratio > 0.05\n"
        );
    }

    #[test]
    fn resource_round_trips_through_yaml() {
        let resource = PrometheusRule::new("recording", "monitoring").with_group(
            RuleGroup::new("node.rules")
                .with_rule(RecordingRule::new("node:cpu:rate5m", "rate(node_cpu[5m])")),
        );

        let yaml = serde_yaml::to_string(&resource).unwrap();
        let parsed: PrometheusRule = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, resource);
    }
}
