//! The routing tree.

use serde::{Deserialize, Serialize};

use promforge_core::{Duration, LabelMatcher};

/// A node in the routing tree.
///
/// An alert traverses the tree in pre-order. A node matches when every
/// matcher in its list holds against the alert's labels; on a match the
/// node's receiver is recorded and traversal continues into its children.
/// Once a child matches, its siblings are skipped unless that child sets
/// `continue: true`. The timing fields inherit from the nearest ancestor
/// that sets them.
///
/// This type only encodes the tree; evaluation is Alertmanager's job.
///
/// # Example
///
/// ```rust
/// use promforge_alertmanager::Route;
/// use promforge_core::{Duration, LabelMatcher};
///
/// let route = Route::new("default").with_route(
///     Route::new("pd-crit")
///         .with_matcher(LabelMatcher::eq("severity", "critical"))
///         .with_group_wait(Duration::from_secs(30)),
/// );
/// assert_eq!(route.routes.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// The receiver notified on match.
    pub receiver: String,
    /// Labels alerts are grouped by; one notification per group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    /// Delay before the first notification of a new group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_wait: Option<Duration>,
    /// Minimum spacing between notifications when a group grows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_interval: Option<Duration>,
    /// Minimum spacing between re-notifications of an unchanged group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<Duration>,
    /// Conjunctive matchers; empty matches every alert.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matchers: Vec<LabelMatcher>,
    /// Whether sibling evaluation continues after this node matches.
    /// Tri-state: the key appears only when explicitly set.
    #[serde(rename = "continue", default, skip_serializing_if = "Option::is_none")]
    pub continue_: Option<bool>,
    /// Child routes, evaluated in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    /// Names of mute time intervals during which this route is silent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mute_time_intervals: Vec<String>,
    /// Names of time intervals outside which this route is silent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_time_intervals: Vec<String>,
}

impl Route {
    /// Creates a route delivering to the given receiver.
    #[must_use]
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            group_by: Vec::new(),
            group_wait: None,
            group_interval: None,
            repeat_interval: None,
            matchers: Vec::new(),
            continue_: None,
            routes: Vec::new(),
            mute_time_intervals: Vec::new(),
            active_time_intervals: Vec::new(),
        }
    }

    /// Sets the grouping labels.
    #[must_use]
    pub fn with_group_by<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the delay before a new group's first notification.
    #[must_use]
    pub fn with_group_wait(mut self, wait: Duration) -> Self {
        self.group_wait = Some(wait);
        self
    }

    /// Sets the spacing between notifications of a growing group.
    #[must_use]
    pub fn with_group_interval(mut self, interval: Duration) -> Self {
        self.group_interval = Some(interval);
        self
    }

    /// Sets the re-notification spacing for unchanged groups.
    #[must_use]
    pub fn with_repeat_interval(mut self, interval: Duration) -> Self {
        self.repeat_interval = Some(interval);
        self
    }

    /// Appends a matcher; all matchers must hold for the route to match.
    #[must_use]
    pub fn with_matcher(mut self, matcher: LabelMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Sets sibling-continuation behavior explicitly.
    #[must_use]
    pub fn with_continue(mut self, continue_: bool) -> Self {
        self.continue_ = Some(continue_);
        self
    }

    /// Appends a child route.
    #[must_use]
    pub fn with_route(mut self, child: Route) -> Self {
        self.routes.push(child);
        self
    }

    /// References a mute time interval by name.
    #[must_use]
    pub fn with_mute_time_interval(mut self, name: impl Into<String>) -> Self {
        self.mute_time_intervals.push(name.into());
        self
    }

    /// References an active time interval by name.
    #[must_use]
    pub fn with_active_time_interval(mut self, name: impl Into<String>) -> Self {
        self.active_time_intervals.push(name.into());
        self
    }
}
