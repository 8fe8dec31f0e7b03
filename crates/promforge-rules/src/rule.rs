//! Recording and alerting rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use promforge_core::Duration;

/// A recording rule: a PromQL evaluation stored as a new series.
///
/// The expression is carried as a string. Callers composing with the
/// expression tree render first and embed the result, which keeps rule
/// files independent of the tree's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingRule {
    /// Name of the series to record, conventionally `level:metric:op`.
    pub record: String,
    /// The PromQL expression to evaluate.
    pub expr: String,
    /// Labels added to the recorded series.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl RecordingRule {
    /// Creates a recording rule.
    #[must_use]
    pub fn new(record: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            expr: expr.into(),
            labels: BTreeMap::new(),
        }
    }

    /// Adds a label to the recorded series.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }
}

/// An alerting rule: a PromQL evaluation whose truthy samples fire as
/// alerts after the sustain window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertingRule {
    /// The alert name.
    pub alert: String,
    /// The PromQL expression to evaluate.
    pub expr: String,
    /// How long the condition must hold before the alert fires.
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_: Option<Duration>,
    /// Labels attached to fired alerts, `severity` among them.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotations attached to fired alerts; templates allowed.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl AlertingRule {
    /// Creates an alerting rule that fires immediately on match.
    #[must_use]
    pub fn new(alert: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            alert: alert.into(),
            expr: expr.into(),
            for_: None,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    /// Sets the sustain window.
    #[must_use]
    pub fn with_for(mut self, duration: Duration) -> Self {
        self.for_ = Some(duration);
        self
    }

    /// Adds a label to fired alerts.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    /// Adds an annotation to fired alerts.
    #[must_use]
    pub fn with_annotation(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(name.into(), value.into());
        self
    }
}

/// Either kind of rule, discriminated on the wire by which of `record`
/// or `alert` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rule {
    /// A recording rule.
    Recording(RecordingRule),
    /// An alerting rule.
    Alerting(AlertingRule),
}

impl From<RecordingRule> for Rule {
    fn from(rule: RecordingRule) -> Self {
        Self::Recording(rule)
    }
}

impl From<AlertingRule> for Rule {
    fn from(rule: AlertingRule) -> Self {
        Self::Alerting(rule)
    }
}
