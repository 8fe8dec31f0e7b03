//! The camelCase projection of relabel rules used inside CRD specs.

use serde::{Deserialize, Serialize};

use promforge_relabel::{RelabelAction, RelabelRule};

/// One relabeling step, keyed the way the operator expects.
///
/// Field for field this is [`RelabelRule`] with `sourceLabels` and
/// `targetLabel` instead of the snake_case server keys; action values
/// are shared. Build rules with the `promforge-relabel` helpers and
/// convert with `into()`.
///
/// # Example
///
/// ```rust
/// use promforge_operator::Relabeling;
/// use promforge_relabel::RelabelRule;
///
/// let relabeling: Relabeling = RelabelRule::rename("__meta_kubernetes_pod_name", "pod").into();
/// let yaml = serde_yaml::to_string(&relabeling)?;
/// assert_eq!(yaml, "sourceLabels:\n- __meta_kubernetes_pod_name\ntargetLabel: pod\n");
/// # Ok::<(), serde_yaml::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Relabeling {
    /// Labels whose values are joined with the separator as input.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_labels: Vec<String>,
    /// Join separator for the source labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Regex matched against the joined input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Modulus for the `hashmod` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulus: Option<u64>,
    /// Label written by value-producing actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_label: Option<String>,
    /// Replacement template, `$1`-style capture references allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// The action to perform; `replace` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RelabelAction>,
}

impl From<RelabelRule> for Relabeling {
    fn from(rule: RelabelRule) -> Self {
        Self {
            source_labels: rule.source_labels,
            separator: rule.separator,
            regex: rule.regex,
            modulus: rule.modulus,
            target_label: rule.target_label,
            replacement: rule.replacement,
            action: rule.action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_if_projects_to_camel_case() {
        let relabeling: Relabeling = RelabelRule::keep_if(
            ["__meta_kubernetes_pod_annotation_prometheus_io_scrape"],
            "true",
        )
        .into();

        assert_eq!(
            serde_yaml::to_string(&relabeling).unwrap(),
            "sourceLabels:\n\
             - __meta_kubernetes_pod_annotation_prometheus_io_scrape\n\
             regex: 'true'\n\
             action: keep\n"
        );
    }

    #[test]
    fn conversion_preserves_every_field() {
        let rule = RelabelRule::hashmod(["__address__"], 4, "__tmp_shard");
        let relabeling: Relabeling = rule.clone().into();
        assert_eq!(relabeling.source_labels, rule.source_labels);
        assert_eq!(relabeling.modulus, rule.modulus);
        assert_eq!(relabeling.target_label, rule.target_label);
        assert_eq!(relabeling.action, rule.action);
    }

    #[test]
    fn unset_fields_stay_out_of_the_output() {
        let relabeling: Relabeling = RelabelRule::label_drop("__meta_.*").into();
        assert_eq!(
            serde_yaml::to_string(&relabeling).unwrap(),
            "regex: __meta_.*\naction: labeldrop\n"
        );
    }
}
