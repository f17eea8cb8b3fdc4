//! # Moon Times Core Library
//!
//! This library computes, for every day of a month at one observer location,
//! the sun and moon event times and a composite "hunt star" activity score
//! derived from how closely those events line up with each other.
//!
//! ## Data Flow
//!
//! For each civil day of the requested month:
//! 1. **Ephemeris**: query sun and moon rise/set, solar noon, illumination and
//!    lunar distance at local midnight ([`ephemeris::Ephemeris::raw_events`])
//! 2. **Windows**: derive the ±30 min moon windows and the ±60 min
//!    meridian, antipode, sunrise and sunset windows ([`windows::DerivedWindows`])
//! 3. **Score**: fold the fixed rule table over the windows ([`score::score`])
//! 4. **Report**: format everything into one [`report::DayReport`]
//!
//! The month driver ([`month::month_report`]) runs that pipeline day by day
//! and returns the reports in ascending date order.
//!
//! ## Absence
//!
//! The sun or moon may not rise or set on a given day (polar conditions, or
//! simply a moon that sets after midnight). Every such event is an `Option`
//! and stays `None` through every window, rule and output field that depends
//! on it. Absence is never an error.
//!
//! ## Core Types
//!
//! - [`Observer`]: latitude and longitude of the observer, in degrees
//! - [`RawEvents`]: everything the ephemeris reports for one day

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

// Module declarations
pub mod clock;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod http;
pub mod lunar;
pub mod month;
pub mod report;
pub mod score;
pub mod solar;
pub mod windows;

pub use error::MoonTimesError;

/// Geographic position of the observer.
///
/// Degrees, north and east positive. Supplied once per request and never
/// mutated afterwards.
///
/// # Example
/// ```
/// use moon_times_lib::Observer;
///
/// let new_york = Observer::new(40.7128, -74.0060);
/// assert_eq!(new_york.latitude, 40.7128);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Latitude in degrees (-90 to +90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to +180)
    pub longitude: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Raw ephemeris output for one civil day.
///
/// Instants are absolute and carried in the server's local time zone, which is
/// the zone every displayed time is formatted in.
#[derive(Clone, Debug, PartialEq)]
pub struct RawEvents {
    /// The civil day these events belong to
    pub day: NaiveDate,
    pub sunrise: Option<DateTime<Local>>,
    pub sunset: Option<DateTime<Local>>,
    pub solar_noon: Option<DateTime<Local>>,
    pub moonrise: Option<DateTime<Local>>,
    pub moonset: Option<DateTime<Local>>,
    /// Illuminated fraction of the lunar disk (0–1)
    pub illumination: f64,
    /// Earth–moon distance as reported by the ephemeris
    pub distance: f64,
}

impl RawEvents {
    /// Illumination on the 0–100 percentage scale.
    pub fn illumination_percent(&self) -> f64 {
        self.illumination * 100.0
    }
}
