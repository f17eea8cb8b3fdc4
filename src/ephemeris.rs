//! # Astronomical Provider
//!
//! The scoring pipeline only needs a handful of instants and two numbers per
//! day. [`Ephemeris`] is the seam behind which those come from: the default
//! [`LowPrecisionEphemeris`] computes them in-process with the models in
//! [`crate::solar`] and [`crate::lunar`]; tests substitute fixed values.
//!
//! All instants are returned in the server's local time zone.

use crate::error::EphemerisError;
use crate::{lunar, solar, Observer, RawEvents};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Sun events of one civil day.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SunTimes {
    pub sunrise: Option<DateTime<Local>>,
    pub sunset: Option<DateTime<Local>>,
    pub solar_noon: Option<DateTime<Local>>,
}

/// Moon events of one civil day.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoonTimes {
    pub rise: Option<DateTime<Local>>,
    pub set: Option<DateTime<Local>>,
}

/// Source of the raw astronomical events for a day and place.
///
/// Implementations must be deterministic: the same instant and observer
/// always yield the same answer.
pub trait Ephemeris {
    fn sun_times(
        &self,
        at: &DateTime<Local>,
        observer: &Observer,
    ) -> Result<SunTimes, EphemerisError>;

    fn moon_times(
        &self,
        at: &DateTime<Local>,
        observer: &Observer,
    ) -> Result<MoonTimes, EphemerisError>;

    /// Illuminated fraction of the lunar disk (0–1).
    fn moon_illumination(&self, at: &DateTime<Local>) -> Result<f64, EphemerisError>;

    fn moon_distance(
        &self,
        at: &DateTime<Local>,
        observer: &Observer,
    ) -> Result<f64, EphemerisError>;

    /// Everything the scoring pipeline needs for `day`, queried at its local midnight.
    fn raw_events(&self, day: NaiveDate, observer: &Observer) -> Result<RawEvents, EphemerisError> {
        let at = local_midnight(day);
        let sun = self.sun_times(&at, observer)?;
        let moon = self.moon_times(&at, observer)?;

        Ok(RawEvents {
            day,
            sunrise: sun.sunrise,
            sunset: sun.sunset,
            solar_noon: sun.solar_noon,
            moonrise: moon.rise,
            moonset: moon.set,
            illumination: self.moon_illumination(&at)?,
            distance: self.moon_distance(&at, observer)?,
        })
    }
}

/// First instant of `day` in the local zone.
///
/// Where a DST jump skips midnight, the instant whose UTC reading is local
/// midnight is used instead.
pub fn local_midnight(day: NaiveDate) -> DateTime<Local> {
    let naive = day.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

/// In-process ephemeris built on the low-precision solar and lunar models.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowPrecisionEphemeris;

impl LowPrecisionEphemeris {
    pub fn new() -> Self {
        Self
    }
}

fn check_observer(observer: &Observer) -> Result<(), EphemerisError> {
    let valid = observer.latitude.is_finite()
        && observer.longitude.is_finite()
        && (-90.0..=90.0).contains(&observer.latitude)
        && (-180.0..=180.0).contains(&observer.longitude);
    if valid {
        Ok(())
    } else {
        Err(EphemerisError::InvalidCoordinates {
            latitude: observer.latitude,
            longitude: observer.longitude,
        })
    }
}

fn to_local(instant: Option<DateTime<Utc>>) -> Option<DateTime<Local>> {
    instant.map(|i| i.with_timezone(&Local))
}

impl Ephemeris for LowPrecisionEphemeris {
    fn sun_times(
        &self,
        at: &DateTime<Local>,
        observer: &Observer,
    ) -> Result<SunTimes, EphemerisError> {
        check_observer(observer)?;
        let at = at.with_timezone(&Utc);
        let events = solar::sun_events(&at, observer.latitude, observer.longitude)?;
        Ok(SunTimes {
            sunrise: to_local(events.sunrise),
            sunset: to_local(events.sunset),
            solar_noon: to_local(events.solar_noon),
        })
    }

    fn moon_times(
        &self,
        at: &DateTime<Local>,
        observer: &Observer,
    ) -> Result<MoonTimes, EphemerisError> {
        check_observer(observer)?;
        let at = at.with_timezone(&Utc);
        let events = lunar::moon_events(&at, observer.latitude, observer.longitude);
        Ok(MoonTimes {
            rise: to_local(events.rise),
            set: to_local(events.set),
        })
    }

    fn moon_illumination(&self, at: &DateTime<Local>) -> Result<f64, EphemerisError> {
        Ok(lunar::moon_illumination(&at.with_timezone(&Utc)).fraction)
    }

    fn moon_distance(
        &self,
        at: &DateTime<Local>,
        observer: &Observer,
    ) -> Result<f64, EphemerisError> {
        check_observer(observer)?;
        let at = at.with_timezone(&Utc);
        Ok(lunar::moon_position(&at, observer.latitude, observer.longitude).distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn raw_events_for_new_york_in_june() {
        let eph = LowPrecisionEphemeris::new();
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let events = eph.raw_events(day, &Observer::new(40.7128, -74.0060)).unwrap();

        assert_eq!(events.day, day);
        assert!(events.sunrise.is_some());
        assert!(events.sunset.is_some());
        assert!(events.solar_noon.is_some());
        assert!((0.0..=1.0).contains(&events.illumination));
        assert!(events.distance > 350_000.0);
    }

    #[test]
    fn out_of_range_observer_is_an_error() {
        let eph = LowPrecisionEphemeris::new();
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let err = eph.raw_events(day, &Observer::new(91.0, 0.0)).unwrap_err();
        assert!(matches!(err, EphemerisError::InvalidCoordinates { .. }));

        let err = eph.raw_events(day, &Observer::new(0.0, f64::NAN)).unwrap_err();
        assert!(matches!(err, EphemerisError::InvalidCoordinates { .. }));
    }

    #[test]
    fn local_midnight_is_start_of_day() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let midnight = local_midnight(day);
        assert_eq!(midnight.date_naive(), day);
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
    }

    #[test]
    fn same_inputs_same_events() {
        let eph = LowPrecisionEphemeris::new();
        let day = NaiveDate::from_ymd_opt(2023, 11, 3).unwrap();
        let observer = Observer::new(-33.8688, 151.2093);
        assert_eq!(
            eph.raw_events(day, &observer).unwrap(),
            eph.raw_events(day, &observer).unwrap()
        );
    }
}
