//! Low-precision solar ephemeris: sunrise, sunset and solar noon.
//!
//! Mean anomaly plus a three-term equation of centre, good to about a minute
//! at mid latitudes. Also hosts the Julian-date and equatorial-coordinate
//! helpers shared with [`crate::lunar`].

use crate::error::EphemerisError;
use chrono::{DateTime, Utc};
use core::f64::consts::PI;

pub(crate) const RAD: f64 = PI / 180.0;
const DAY_MS: f64 = 86_400_000.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
/// Obliquity of the ecliptic.
const OBLIQUITY: f64 = RAD * 23.4397;
/// Transit correction from the equation of time fit.
const J0: f64 = 0.0009;
/// Apparent altitude of the sun's upper limb at rise/set, with refraction.
const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

/// Sun events for one civil day; absent when the sun stays up or down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunEvents {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub solar_noon: Option<DateTime<Utc>>,
}

/// Right ascension and declination, radians.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Equatorial {
    pub ra: f64,
    pub dec: f64,
}

pub(crate) fn to_julian(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

pub(crate) fn from_julian(julian: f64) -> Result<DateTime<Utc>, EphemerisError> {
    let ms = (julian + 0.5 - J1970) * DAY_MS;
    if !ms.is_finite() || ms.abs() > i64::MAX as f64 {
        return Err(EphemerisError::InstantOutOfRange(julian));
    }
    DateTime::from_timestamp_millis(ms as i64).ok_or(EphemerisError::InstantOutOfRange(julian))
}

/// Days since J2000.0.
pub(crate) fn to_days(instant: &DateTime<Utc>) -> f64 {
    to_julian(instant) - J2000
}

pub(crate) fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

pub(crate) fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

pub(crate) fn altitude(hour_angle: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * hour_angle.cos()).asin()
}

/// `lw` is the west longitude in radians.
pub(crate) fn sidereal_time(days: f64, lw: f64) -> f64 {
    RAD * (280.16 + 360.985_623_5 * days) - lw
}

/// Atmospheric refraction for an apparent altitude `h` (radians).
pub(crate) fn astro_refraction(h: f64) -> f64 {
    // the formula diverges below the horizon
    let h = h.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

fn solar_mean_anomaly(days: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * days)
}

fn ecliptic_longitude(mean_anomaly: f64) -> f64 {
    let m = mean_anomaly;
    let centre = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = RAD * 102.9372;
    m + centre + perihelion + PI
}

pub(crate) fn sun_coords(days: f64) -> Equatorial {
    let l = ecliptic_longitude(solar_mean_anomaly(days));
    Equatorial {
        ra: right_ascension(l, 0.0),
        dec: declination(l, 0.0),
    }
}

fn julian_cycle(days: f64, lw: f64) -> f64 {
    (days - J0 - lw / (2.0 * PI)).round()
}

fn approx_transit(hour_angle: f64, lw: f64, cycle: f64) -> f64 {
    J0 + (hour_angle + lw) / (2.0 * PI) + cycle
}

fn solar_transit_julian(ds: f64, mean_anomaly: f64, longitude: f64) -> f64 {
    J2000 + ds + 0.0053 * mean_anomaly.sin() - 0.0069 * (2.0 * longitude).sin()
}

/// Hour angle at which the sun reaches altitude `h`; `None` if it never does.
fn hour_angle(h: f64, phi: f64, dec: f64) -> Option<f64> {
    let cos_h = (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    (-1.0..=1.0).contains(&cos_h).then(|| cos_h.acos())
}

/// Sunrise, sunset and solar noon for the solar day nearest `at`.
///
/// `at` should be local midnight of the civil day of interest. Rise and set
/// are `None` during polar day or polar night; noon is always present.
pub fn sun_events(
    at: &DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> Result<SunEvents, EphemerisError> {
    let lw = RAD * -longitude;
    let phi = RAD * latitude;

    let days = to_days(at);
    let cycle = julian_cycle(days, lw);
    let ds = approx_transit(0.0, lw, cycle);

    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l, 0.0);

    let j_noon = solar_transit_julian(ds, m, l);

    let (sunrise, sunset) = match hour_angle(SUNRISE_ALTITUDE_DEG * RAD, phi, dec) {
        Some(w) => {
            let j_set = solar_transit_julian(approx_transit(w, lw, cycle), m, l);
            let j_rise = j_noon - (j_set - j_noon);
            (Some(from_julian(j_rise)?), Some(from_julian(j_set)?))
        }
        None => (None, None),
    };

    Ok(SunEvents {
        sunrise,
        sunset,
        solar_noon: Some(from_julian(j_noon)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn julian_round_trip_of_unix_epoch() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 12, 0, 0).unwrap();
        assert!((to_julian(&epoch) - J1970).abs() < 1e-9);
        assert_eq!(from_julian(J1970).unwrap(), epoch);
    }

    #[test]
    fn from_julian_rejects_non_finite() {
        assert!(from_julian(f64::NAN).is_err());
        assert!(from_julian(f64::INFINITY).is_err());
    }

    #[test]
    fn greenwich_equinox_day_is_about_twelve_hours() {
        let at = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let events = sun_events(&at, 51.4779, 0.0).unwrap();
        let rise = events.sunrise.unwrap();
        let set = events.sunset.unwrap();
        let noon = events.solar_noon.unwrap();

        let length = (set - rise).num_minutes();
        assert!((720..=740).contains(&length), "day length {length} min");
        // Solar noon at Greenwich sits close to 12:07 UTC in late March
        assert_eq!(noon.hour(), 12);
        assert!(rise < noon && noon < set);
    }

    #[test]
    fn new_york_summer_solstice() {
        let at = Utc.with_ymd_and_hms(2024, 6, 21, 4, 0, 0).unwrap();
        let events = sun_events(&at, 40.7128, -74.0060).unwrap();
        // Sunrise ~09:25 UTC, sunset ~00:31 UTC next day
        let rise = events.sunrise.unwrap();
        assert_eq!(rise.hour(), 9);
        let length = (events.sunset.unwrap() - rise).num_minutes();
        assert!((900..=910).contains(&length), "day length {length} min");
    }

    #[test]
    fn polar_night_has_no_rise_or_set() {
        let at = Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap();
        let events = sun_events(&at, 78.2232, 15.6267).unwrap();
        assert!(events.sunrise.is_none());
        assert!(events.sunset.is_none());
        assert!(events.solar_noon.is_some());
    }

    #[test]
    fn midnight_sun_has_no_rise_or_set() {
        let at = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let events = sun_events(&at, 78.2232, 15.6267).unwrap();
        assert!(events.sunrise.is_none());
        assert!(events.sunset.is_none());
    }
}
