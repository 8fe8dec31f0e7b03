//! Prometheus-style compound durations.
//!
//! Prometheus, Alertmanager, and the operator CRDs all express time spans
//! as compact compound strings such as `1h30m`, `500ms`, or `-30s`. This
//! module provides [`Duration`], a signed nanosecond count whose textual
//! form follows that grammar and round-trips through YAML scalars.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000 * NANOS_PER_MILLI;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;
const NANOS_PER_WEEK: i64 = 7 * NANOS_PER_DAY;
const NANOS_PER_YEAR: i64 = 365 * NANOS_PER_DAY;

/// A signed time span with the Prometheus compound textual form.
///
/// The value is stored as nanoseconds. The textual form concatenates
/// `<integer><unit>` tokens in descending magnitude using the canonical
/// units hours, minutes, seconds, and milliseconds (`1h30m`, `5m30s`,
/// `500ms`); zero renders as `0s` and negative values carry a leading `-`.
/// Day, week, and year tokens (`d` = 24h, `w` = 7d, `y` = 365d) are
/// accepted on input but never emitted: hour-aligned values render in
/// hours (`2d` parses and re-renders as `48h`).
///
/// The textual form has millisecond resolution. All public constructors
/// except [`Duration::from_nanos`] are millisecond-granular; sub-millisecond
/// residue is dropped by the textual form and therefore does not survive a
/// round-trip.
///
/// # Example
///
/// ```rust
/// use promforge_core::Duration;
///
/// let d = Duration::from_secs(330);
/// assert_eq!(d.to_string(), "5m30s");
/// assert_eq!("5m30s".parse::<Duration>().unwrap(), d);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    /// The zero duration (`0s`).
    pub const ZERO: Self = Self(0);

    /// Creates a duration from a raw nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Creates a duration from milliseconds (saturating at the i64 range).
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(NANOS_PER_MILLI))
    }

    /// Creates a duration from seconds (saturating at the i64 range).
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(NANOS_PER_SECOND))
    }

    /// Creates a duration from minutes (saturating at the i64 range).
    #[must_use]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes.saturating_mul(NANOS_PER_MINUTE))
    }

    /// Creates a duration from hours (saturating at the i64 range).
    #[must_use]
    pub const fn from_hours(hours: i64) -> Self {
        Self(hours.saturating_mul(NANOS_PER_HOUR))
    }

    /// Returns the raw nanosecond count.
    #[must_use]
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }

    /// Returns the duration in whole milliseconds, truncating toward zero.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0 / NANOS_PER_MILLI
    }

    /// Returns the duration in whole seconds, truncating toward zero.
    #[must_use]
    pub const fn as_secs(&self) -> i64 {
        self.0 / NANOS_PER_SECOND
    }

    /// Returns true if the duration is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the duration is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a compound duration string.
    ///
    /// Accepts an optional leading `-` followed by one or more
    /// `<digits><unit>` tokens over the units `ms`, `s`, `m`, `h`, `d`,
    /// `w`, `y`. Tokens may appear in any order and repeat; their values
    /// are summed with overflow checking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDuration`] for empty input, a token
    /// without digits, an unknown unit, trailing characters, or overflow.
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedDuration {
            input: input.to_string(),
            reason,
        };

        let (negative, body) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        if body.is_empty() {
            return Err(malformed("empty input".to_string()));
        }

        let bytes = body.as_bytes();
        let mut pos = 0;
        let mut total: i64 = 0;
        while pos < bytes.len() {
            let digits_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos == digits_start {
                return Err(malformed(format!(
                    "expected digits at offset {digits_start}"
                )));
            }
            let value: i64 = body[digits_start..pos]
                .parse()
                .map_err(|_| malformed("value overflows".to_string()))?;

            // "ms" must be tried before "m".
            let unit_nanos = if body[pos..].starts_with("ms") {
                pos += 2;
                NANOS_PER_MILLI
            } else {
                let unit = bytes
                    .get(pos)
                    .ok_or_else(|| malformed("missing unit".to_string()))?;
                pos += 1;
                match unit {
                    b's' => NANOS_PER_SECOND,
                    b'm' => NANOS_PER_MINUTE,
                    b'h' => NANOS_PER_HOUR,
                    b'd' => NANOS_PER_DAY,
                    b'w' => NANOS_PER_WEEK,
                    b'y' => NANOS_PER_YEAR,
                    other => {
                        return Err(malformed(format!(
                            "unknown unit {:?}",
                            char::from(*other)
                        )));
                    }
                }
            };

            total = value
                .checked_mul(unit_nanos)
                .and_then(|n| total.checked_add(n))
                .ok_or_else(|| malformed("value overflows".to_string()))?;
        }

        Ok(Self(if negative { -total } else { total }))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0s");
        }

        let mut rest = self.0.unsigned_abs();
        let mut body = String::new();
        for (unit_nanos, suffix) in [
            (NANOS_PER_HOUR as u64, "h"),
            (NANOS_PER_MINUTE as u64, "m"),
            (NANOS_PER_SECOND as u64, "s"),
            (NANOS_PER_MILLI as u64, "ms"),
        ] {
            let count = rest / unit_nanos;
            if count > 0 {
                body.push_str(&count.to_string());
                body.push_str(suffix);
                rest %= unit_nanos;
            }
        }

        // Only sub-millisecond residue: indistinguishable from zero on the wire.
        if body.is_empty() {
            return f.write_str("0s");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }
        f.write_str(&body)
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = Error;

    fn try_from(value: std::time::Duration) -> Result<Self> {
        let nanos =
            i64::try_from(value.as_nanos()).map_err(|_| Error::MalformedDuration {
                input: format!("{value:?}"),
                reason: "exceeds representable range".to_string(),
            })?;
        Ok(Self(nanos))
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct DurationVisitor;

impl Visitor<'_> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a Prometheus duration string such as \"5m30s\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Duration, E> {
        Duration::parse(v).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_str(DurationVisitor)
    }
}
