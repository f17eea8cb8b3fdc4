//! # Day Report
//!
//! One JSON record per civil day. Times are `HH:MM` strings or `null`; the
//! key names are part of the public API and stay camelCase.

use crate::clock::{format_day_length, ClockTime};
use crate::windows::{DerivedWindows, Window};
use crate::RawEvents;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReport {
    /// `YYYY/MM/DD`
    pub date: String,
    pub moonrise: Option<ClockTime>,
    pub moonset: Option<ClockTime>,
    pub meridian_passing: Option<ClockTime>,
    pub opposite_meridian_passing: Option<ClockTime>,
    pub sunrise: Option<ClockTime>,
    pub sunset: Option<ClockTime>,
    pub solar_noon: Option<ClockTime>,
    /// Sunset minus sunrise as `HH:MM:SS`
    #[serde(rename = "daylength")]
    pub day_length: Option<String>,
    pub thirty_minutes_before_moonrise: Option<ClockTime>,
    pub thirty_minutes_after_moonrise: Option<ClockTime>,
    pub thirty_minutes_before_moonset: Option<ClockTime>,
    pub thirty_minutes_after_moonset: Option<ClockTime>,
    pub one_hour_before_meridian: Option<ClockTime>,
    pub one_hour_after_meridian: Option<ClockTime>,
    pub one_hour_before_opposite_meridian: Option<ClockTime>,
    pub one_hour_after_opposite_meridian: Option<ClockTime>,
    pub one_hour_before_sunrise: Option<ClockTime>,
    pub one_hour_after_sunrise: Option<ClockTime>,
    pub one_hour_before_sunset: Option<ClockTime>,
    pub one_hour_after_sunset: Option<ClockTime>,
    /// Illuminated percentage, two decimals
    pub illumination: String,
    /// `"<distance, two decimals> meters"`
    pub distance: String,
    #[serde(rename = "huntStar")]
    pub score: f64,
    pub meridian_times_available: bool,
}

fn clock(instant: Option<DateTime<Local>>) -> Option<ClockTime> {
    instant.as_ref().map(ClockTime::from_instant)
}

fn bounds(window: Option<Window>) -> (Option<ClockTime>, Option<ClockTime>) {
    match window {
        Some(w) => (Some(w.start_clock()), Some(w.end_clock())),
        None => (None, None),
    }
}

impl DayReport {
    pub fn assemble(events: &RawEvents, windows: &DerivedWindows, score: f64) -> Self {
        let (before_moonrise, after_moonrise) = bounds(windows.moonrise);
        let (before_moonset, after_moonset) = bounds(windows.moonset);
        let (before_meridian, after_meridian) = bounds(windows.meridian);
        let (before_opposite, after_opposite) = bounds(windows.opposite_meridian);
        let (before_sunrise, after_sunrise) = bounds(windows.sunrise);
        let (before_sunset, after_sunset) = bounds(windows.sunset);

        let day_length = match (events.sunrise, events.sunset) {
            (Some(rise), Some(set)) => Some(format_day_length(set - rise)),
            _ => None,
        };

        Self {
            date: events.day.format("%Y/%m/%d").to_string(),
            moonrise: clock(events.moonrise),
            moonset: clock(events.moonset),
            meridian_passing: clock(windows.meridian_passing),
            opposite_meridian_passing: clock(windows.opposite_meridian_passing),
            sunrise: clock(events.sunrise),
            sunset: clock(events.sunset),
            solar_noon: clock(events.solar_noon),
            day_length,
            thirty_minutes_before_moonrise: before_moonrise,
            thirty_minutes_after_moonrise: after_moonrise,
            thirty_minutes_before_moonset: before_moonset,
            thirty_minutes_after_moonset: after_moonset,
            one_hour_before_meridian: before_meridian,
            one_hour_after_meridian: after_meridian,
            one_hour_before_opposite_meridian: before_opposite,
            one_hour_after_opposite_meridian: after_opposite,
            one_hour_before_sunrise: before_sunrise,
            one_hour_after_sunrise: after_sunrise,
            one_hour_before_sunset: before_sunset,
            one_hour_after_sunset: after_sunset,
            illumination: format!("{:.2}", events.illumination_percent()),
            distance: format!("{:.2} meters", events.distance),
            score,
            meridian_times_available: before_meridian.is_some() && after_meridian.is_some(),
        }
    }
}
