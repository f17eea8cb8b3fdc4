//! # Derived Time Windows
//!
//! Fixed-offset windows around each raw event of a day:
//!
//! | Source event              | Offset  |
//! |---------------------------|---------|
//! | moonrise, moonset         | ±30 min |
//! | meridian passing          | ±60 min |
//! | opposite meridian passing | ±60 min |
//! | sunrise, sunset           | ±60 min |
//!
//! Meridian passing is the midpoint of moonrise and moonset and only exists
//! when both do; its opposite is twelve hours later. A window exists only if
//! its source event does.

use crate::clock::ClockTime;
use crate::RawEvents;
use chrono::{DateTime, Duration, Local};

const MOON_EVENT_OFFSET_MINUTES: i64 = 30;
const MAJOR_OFFSET_MINUTES: i64 = 60;

/// A closed interval of instants around an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl Window {
    /// Window spanning `offset` before to `offset` after `center`.
    pub fn around(center: DateTime<Local>, offset: Duration) -> Self {
        Self {
            start: center - offset,
            end: center + offset,
        }
    }

    pub fn start_clock(&self) -> ClockTime {
        ClockTime::from_instant(&self.start)
    }

    pub fn end_clock(&self) -> ClockTime {
        ClockTime::from_instant(&self.end)
    }
}

/// All derived instants and windows of one day.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DerivedWindows {
    pub meridian_passing: Option<DateTime<Local>>,
    pub opposite_meridian_passing: Option<DateTime<Local>>,
    pub moonrise: Option<Window>,
    pub moonset: Option<Window>,
    pub meridian: Option<Window>,
    pub opposite_meridian: Option<Window>,
    pub sunrise: Option<Window>,
    pub sunset: Option<Window>,
}

impl DerivedWindows {
    pub fn build(events: &RawEvents) -> Self {
        let minor = Duration::minutes(MOON_EVENT_OFFSET_MINUTES);
        let major = Duration::minutes(MAJOR_OFFSET_MINUTES);

        let meridian_passing = match (events.moonrise, events.moonset) {
            (Some(rise), Some(set)) => Some(rise + (set - rise) / 2),
            _ => None,
        };
        let opposite_meridian_passing = meridian_passing.map(|m| m + Duration::hours(12));

        Self {
            meridian_passing,
            opposite_meridian_passing,
            moonrise: events.moonrise.map(|t| Window::around(t, minor)),
            moonset: events.moonset.map(|t| Window::around(t, minor)),
            meridian: meridian_passing.map(|t| Window::around(t, major)),
            opposite_meridian: opposite_meridian_passing.map(|t| Window::around(t, major)),
            sunrise: events.sunrise.map(|t| Window::around(t, major)),
            sunset: events.sunset.map(|t| Window::around(t, major)),
        }
    }
}
