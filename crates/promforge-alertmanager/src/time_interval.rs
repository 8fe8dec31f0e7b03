//! Named time intervals for muting and activating routes.

use serde::{Deserialize, Serialize};

/// A named set of time intervals routes reference by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MuteTimeInterval {
    /// The name routes reference in `mute_time_intervals` or
    /// `active_time_intervals`.
    pub name: String,
    /// The intervals; the name matches when any of them does.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_intervals: Vec<TimeInterval>,
}

impl MuteTimeInterval {
    /// Creates a named set with no intervals.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time_intervals: Vec::new(),
        }
    }

    /// Adds an interval.
    #[must_use]
    pub fn with_interval(mut self, interval: TimeInterval) -> Self {
        self.time_intervals.push(interval);
        self
    }
}

/// One interval; all set fields must match simultaneously.
///
/// Each field is a conjunct: an instant is inside the interval when it
/// satisfies every field that is present. Absent fields match always.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// In-day ranges, `HH:MM` inclusive start and exclusive end.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub times: Vec<TimeRange>,
    /// Weekday names or ranges, e.g. `saturday` or `monday:friday`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<String>,
    /// Days of the month; negative values count from the end.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_month: Vec<String>,
    /// Month names or numbers, single or ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<String>,
    /// Years, single or ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub years: Vec<String>,
    /// IANA time zone the interval is evaluated in; UTC when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl TimeInterval {
    /// Creates an interval matching all instants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an in-day range.
    #[must_use]
    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.times.push(TimeRange {
            start_time: start.into(),
            end_time: end.into(),
        });
        self
    }

    /// Adds a weekday name or range.
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl Into<String>) -> Self {
        self.weekdays.push(weekdays.into());
        self
    }

    /// Adds a day-of-month value or range.
    #[must_use]
    pub fn with_days_of_month(mut self, days: impl Into<String>) -> Self {
        self.days_of_month.push(days.into());
        self
    }

    /// Adds a month value or range.
    #[must_use]
    pub fn with_months(mut self, months: impl Into<String>) -> Self {
        self.months.push(months.into());
        self
    }

    /// Sets the evaluation time zone.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// An in-day range with inclusive start and exclusive end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the range, `HH:MM`.
    pub start_time: String,
    /// End of the range, `HH:MM`; `24:00` closes the day.
    pub end_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekend_mute_serializes_compactly() {
        let mute = MuteTimeInterval::new("weekends")
            .with_interval(TimeInterval::new().with_weekdays("saturday:sunday"));

        assert_eq!(
            serde_yaml::to_string(&mute).unwrap(),
            "name: weekends\n\
             time_intervals:\n\
             - weekdays:\n\
             \x20\x20- saturday:sunday\n"
        );
    }

    #[test]
    fn out_of_hours_combines_conjuncts() {
        let interval = TimeInterval::new()
            .with_times("00:00", "08:00")
            .with_times("18:00", "24:00")
            .with_weekdays("monday:friday")
            .with_location("Europe/Berlin");

        let yaml = serde_yaml::to_string(&interval).unwrap();
        assert!(yaml.contains("start_time: 00:00"), "{yaml}");
        assert!(yaml.contains("end_time: 24:00"), "{yaml}");
        assert!(yaml.contains("location: Europe/Berlin"), "{yaml}");

        let parsed: TimeInterval = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, interval);
    }

    #[test]
    fn empty_interval_emits_no_keys() {
        assert_eq!(serde_yaml::to_string(&TimeInterval::new()).unwrap(), "{}\n");
    }
}
