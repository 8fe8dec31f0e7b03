//! Inhibition rules that mute alerts shadowed by more severe ones.

use serde::{Deserialize, Serialize};

use promforge_core::LabelMatcher;

/// Mutes target alerts while a matching source alert fires.
///
/// A target alert is inhibited when some firing alert matches every
/// source matcher and agrees with the target on all `equal` labels.
/// An empty `equal` list inhibits unconditionally, which is almost
/// never what an operator wants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_inhibits_warning_on_same_alertname() {
        let rule = InhibitRule::new()
            .with_source(LabelMatcher::eq("severity", "critical"))
            .with_target(LabelMatcher::eq("severity", "warning"))
            .with_equal("alertname")
            .with_equal("cluster");

        assert_eq!(
            serde_yaml::to_string(&rule).unwrap(),
            "source_matchers:\n\
             - severity=\"critical\"\n\
             target_matchers:\n\
             - severity=\"warning\"\n\
             equal:\n\
             - alertname\n\
             - cluster\n"
        );
    }

    #[test]
    fn matchers_round_trip_through_yaml() {
        let rule = InhibitRule::new()
            .with_source(LabelMatcher::re("job", "node.*"))
            .with_target(LabelMatcher::ne("team", "infra"))
            .with_equal("instance");
        let yaml = serde_yaml::to_string(&rule).unwrap();
        let parsed: InhibitRule = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, rule);
    }
}
