//! Instant and range vector selectors.

use std::fmt;

use promforge_core::{Duration, LabelMatcher};

/// An instant vector selector: a metric name plus label matchers.
///
/// Renders as `name` alone or `name{m1,m2}` when matchers are present,
/// followed by ` offset <dur>` when an offset is set.
///
/// # Example
///
/// ```rust
/// use promforge_promql::{LabelMatcher, VectorSelector};
///
/// let selector = VectorSelector::new("http_requests_total")
///     .with_matcher(LabelMatcher::eq("job", "api"))
///     .with_matcher(LabelMatcher::re("code", "5.."));
/// assert_eq!(selector.to_string(), "http_requests_total{job=\"api\",code=~\"5..\"}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSelector {
    /// The metric name.
    pub metric: String,
    /// Label matchers, rendered inside braces when non-empty.
    pub matchers: Vec<LabelMatcher>,
    /// Optional evaluation-time offset.
    pub offset: Option<Duration>,
}

impl VectorSelector {
    /// Creates a selector for a bare metric name.
    #[must_use]
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            matchers: Vec::new(),
            offset: None,
        }
    }

    /// Appends a label matcher.
    #[must_use]
    pub fn with_matcher(mut self, matcher: LabelMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Sets the evaluation offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Duration) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Turns this instant vector into a range vector over `window`.
    #[must_use]
    pub fn range(self, window: Duration) -> RangeSelector {
        RangeSelector {
            vector: self,
            window,
        }
    }

    /// Writes the `name{matchers}` part, without the offset.
    pub(crate) fn fmt_base(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metric)?;
        if !self.matchers.is_empty() {
            f.write_str("{")?;
            for (i, matcher) in self.matchers.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{matcher}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

impl fmt::Display for VectorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_base(f)?;
        if let Some(offset) = self.offset {
            write!(f, " offset {offset}")?;
        }
        Ok(())
    }
}

/// A range vector selector: an instant vector observed over a window.
///
/// The offset lives on the underlying vector but renders after the
/// window, matching PromQL grammar: `name{...}[5m] offset 1h`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelector {
    /// The underlying instant vector.
    pub vector: VectorSelector,
    /// The lookback window.
    pub window: Duration,
}

impl RangeSelector {
    /// Creates a range vector from an instant vector and a window.
    #[must_use]
    pub fn new(vector: VectorSelector, window: Duration) -> Self {
        Self { vector, window }
    }

    /// Sets the evaluation offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Duration) -> Self {
        self.vector.offset = Some(offset);
        self
    }
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.vector.fmt_base(f)?;
        write!(f, "[{}]", self.window)?;
        if let Some(offset) = self.vector.offset {
            write!(f, " offset {offset}")?;
        }
        Ok(())
    }
}
