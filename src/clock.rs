//! # Wall-Clock Times
//!
//! Every time shown to clients is a 24-hour `HH:MM` wall-clock string in the
//! server's local zone, with seconds truncated. Overlap tests work on the same
//! representation, so a candidate and a window compare exactly as displayed.
//!
//! [`is_between`] deliberately does not wrap around midnight: a window that
//! starts at `22:00` and ends at `01:00` has `start > end` and never matches.

use chrono::{DateTime, Duration, TimeZone, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day at minute resolution.
///
/// Stored as minutes since midnight (0–1439).
///
/// # Example
/// ```
/// use moon_times_lib::clock::ClockTime;
///
/// let t: ClockTime = "07:05".parse().unwrap();
/// assert_eq!(t.minutes(), 425);
/// assert_eq!(t.to_string(), "07:05");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid clock time {0:?}, expected HH:MM")]
pub struct ClockParseError(String);

impl ClockTime {
    /// Build from hours and minutes; `None` if either is out of range.
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        let total = hours.checked_mul(60)?.checked_add(minutes)?;
        (minutes < 60 && total < MINUTES_PER_DAY as u32).then(|| Self(total as u16))
    }

    /// Wall-clock time of `instant` in its own zone, seconds truncated.
    pub fn from_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self((instant.hour() * 60 + instant.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ClockParseError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hours: u32 = h.parse().map_err(|_| err())?;
        let minutes: u32 = m.parse().map_err(|_| err())?;
        Self::new(hours, minutes).ok_or_else(err)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive, non-wrapping range test on the 24-hour clock.
///
/// Returns `start <= candidate <= end` in minutes since midnight.
pub fn is_between(candidate: ClockTime, start: ClockTime, end: ClockTime) -> bool {
    start <= candidate && candidate <= end
}

/// Format a duration as `HH:MM:SS`, truncated to whole seconds.
///
/// Hours are not reduced modulo 24. Negative durations clamp to zero.
pub fn format_day_length(length: Duration) -> String {
    let total = length.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
