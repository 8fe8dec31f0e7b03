//! Rule groups and the top-level rule file.

use serde::{Deserialize, Serialize};

use promforge_core::Duration;

use crate::rule::Rule;

/// A named list of rules evaluated together at one interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    /// The group name, unique within a file.
    pub name: String,
    /// Evaluation interval; the server default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Duration>,
    /// The rules, evaluated in order.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interval: None,
            rules: Vec::new(),
        }
    }

    /// Sets the evaluation interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push(rule.into());
        self
    }
}

/// A rule file: the `{groups: [...]}` document Prometheus loads from
/// `rule_files` globs.
///
/// # Example
///
/// ```rust
/// use promforge_core::{Duration, ToYaml};
/// use promforge_rules::{AlertingRule, RuleFile, RuleGroup};
///
/// let file = RuleFile::new().with_group(
///     RuleGroup::new("node.rules").with_rule(
///         AlertingRule::new("InstanceDown", "up == 0")
///             .with_for(Duration::from_minutes(5)),
///     ),
/// );
/// let yaml = file.to_yaml()?;
/// assert!(yaml.starts_with("groups:\n- name: node.rules\n"));
/// # Ok::<(), promforge_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleFile {
    /// The groups, in evaluation order.
    pub groups: Vec<RuleGroup>,
}

impl RuleFile {
    /// Creates an empty rule file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group.
    #[must_use]
    pub fn with_group(mut self, group: RuleGroup) -> Self {
        self.groups.push(group);
        self
    }
}
