//! Low-precision lunar ephemeris: position, distance, illumination, rise & set.
//!
//! Three-term model of the lunar longitude, latitude and distance (Meeus,
//! "Astronomical Algorithms", leading terms only). Accuracy: a fraction of a
//! degree in position, a few minutes in rise/set, ~1 % in distance.
//!
//! Rise and set are found numerically: the topocentric altitude is sampled
//! every hour across the 24 hours after the given instant, a parabola is fitted
//! through each consecutive triple and its roots inside the triple are taken as
//! horizon crossings.

use crate::solar::{
    altitude, astro_refraction, declination, right_ascension, sidereal_time, sun_coords, to_days,
    RAD,
};
use chrono::{DateTime, Duration, Utc};

/// Mean Sun–Earth distance in km, used for the phase angle.
const SUN_DISTANCE_KM: f64 = 149_598_000.0;
/// Altitude of the moon's centre at rise/set: parallax minus semi-diameter minus refraction.
const MOON_HORIZON: f64 = 0.133 * RAD;

/// Geocentric lunar coordinates.
#[derive(Clone, Copy, Debug)]
struct LunarCoords {
    ra: f64,
    dec: f64,
    distance: f64,
}

/// Where the moon stands for an observer at one instant.
#[derive(Debug, Clone, Copy)]
pub struct MoonPosition {
    /// Apparent altitude above the horizon in radians, refraction included.
    pub altitude: f64,
    /// Earth–moon distance in kilometres.
    pub distance: f64,
}

/// Lit portion of the lunar disk.
#[derive(Debug, Clone, Copy)]
pub struct MoonIllumination {
    /// Illuminated fraction (0–1): 0 = new, 1 = full.
    pub fraction: f64,
    /// Position in the synodic cycle (0–1): 0 = new, 0.25 = first quarter, 0.5 = full.
    pub phase: f64,
}

/// Moon rise and set within the 24 hours after the query instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonEvents {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
}

fn moon_coords(days: f64) -> LunarCoords {
    let mean_longitude = RAD * (218.316 + 13.176_396 * days);
    let mean_anomaly = RAD * (134.963 + 13.064_993 * days);
    let argument_of_latitude = RAD * (93.272 + 13.229_350 * days);

    let l = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let b = RAD * 5.128 * argument_of_latitude.sin();

    LunarCoords {
        ra: right_ascension(l, b),
        dec: declination(l, b),
        distance: 385_001.0 - 20_905.0 * mean_anomaly.cos(),
    }
}

/// Moon altitude and distance for an observer at `at`.
pub fn moon_position(at: &DateTime<Utc>, latitude: f64, longitude: f64) -> MoonPosition {
    let lw = RAD * -longitude;
    let phi = RAD * latitude;
    let days = to_days(at);

    let coords = moon_coords(days);
    let hour_angle = sidereal_time(days, lw) - coords.ra;
    let h = altitude(hour_angle, phi, coords.dec);

    MoonPosition {
        altitude: h + astro_refraction(h),
        distance: coords.distance,
    }
}

/// Illuminated fraction and phase of the moon at `at`.
pub fn moon_illumination(at: &DateTime<Utc>) -> MoonIllumination {
    let days = to_days(at);
    let sun = sun_coords(days);
    let moon = moon_coords(days);

    // geocentric elongation of the moon from the sun
    let elongation = (sun.dec.sin() * moon.dec.sin()
        + sun.dec.cos() * moon.dec.cos() * (sun.ra - moon.ra).cos())
    .acos();
    let incidence = (SUN_DISTANCE_KM * elongation.sin())
        .atan2(moon.distance - SUN_DISTANCE_KM * elongation.cos());
    let angle = (sun.dec.cos() * (sun.ra - moon.ra).sin()).atan2(
        sun.dec.sin() * moon.dec.cos() - sun.dec.cos() * moon.dec.sin() * (sun.ra - moon.ra).cos(),
    );
    let waning = if angle < 0.0 { -1.0 } else { 1.0 };

    MoonIllumination {
        fraction: (1.0 + incidence.cos()) / 2.0,
        phase: 0.5 + 0.5 * incidence * waning / core::f64::consts::PI,
    }
}

fn hours_later(at: &DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    *at + Duration::milliseconds((hours * 3_600_000.0) as i64)
}

/// Moon rise and set during the 24 hours following `at`.
///
/// `at` should be local midnight of the civil day of interest. Either event
/// is `None` when the moon does not cross the horizon in that span.
pub fn moon_events(at: &DateTime<Utc>, latitude: f64, longitude: f64) -> MoonEvents {
    let altitude_at = |hours: f64| {
        moon_position(&hours_later(at, hours), latitude, longitude).altitude - MOON_HORIZON
    };

    let mut h0 = altitude_at(0.0);
    let mut rise: Option<f64> = None;
    let mut set: Option<f64> = None;

    // walk two-hour steps, each step a parabola through (i-1, i, i+1)
    for step in (1..=24).step_by(2) {
        let i = step as f64;
        let h1 = altitude_at(i);
        let h2 = altitude_at(i + 1.0);

        let a = (h0 + h2) / 2.0 - h1;
        let b = (h2 - h0) / 2.0;
        let xe = -b / (2.0 * a);
        let ye = (a * xe + b) * xe + h1;
        let d = b * b - 4.0 * a * h1;

        let mut roots = 0;
        let mut x1 = 0.0;
        let mut x2 = 0.0;
        if d >= 0.0 {
            let dx = d.sqrt() / (a.abs() * 2.0);
            x1 = xe - dx;
            x2 = xe + dx;
            if x1.abs() <= 1.0 {
                roots += 1;
            }
            if x2.abs() <= 1.0 {
                roots += 1;
            }
            if x1 < -1.0 {
                x1 = x2;
            }
        }

        match roots {
            1 if h0 < 0.0 => rise = Some(i + x1),
            1 => set = Some(i + x1),
            2 => {
                let (r, s) = if ye < 0.0 { (x2, x1) } else { (x1, x2) };
                rise = Some(i + r);
                set = Some(i + s);
            }
            _ => {}
        }

        if rise.is_some() && set.is_some() {
            break;
        }
        h0 = h2;
    }

    MoonEvents {
        rise: rise.map(|h| hours_later(at, h)),
        set: set.map(|h| hours_later(at, h)),
    }
}
