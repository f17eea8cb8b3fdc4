//! # Month Driver
//!
//! Validates a month request, then runs ephemeris → windows → score → report
//! for each day of the month in ascending order. Days are generated as fresh
//! `NaiveDate` values; nothing is carried from one day to the next.
//!
//! The first ephemeris failure aborts the whole month: callers get either
//! every day or an error, never a partial sequence.

use crate::ephemeris::Ephemeris;
use crate::error::{MoonTimesError, ValidationError};
use crate::report::DayReport;
use crate::score::{matched_rules, score};
use crate::windows::DerivedWindows;
use crate::Observer;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

/// A validated request for one month of day reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonthRequest {
    year: i32,
    month: u32,
    observer: Observer,
}

impl MonthRequest {
    /// Validate before any computation.
    ///
    /// Month must be 1–12, the year representable by the calendar, and the
    /// coordinates finite.
    pub fn new(year: i32, month: u32, observer: Observer) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth);
        }
        if !observer.latitude.is_finite() {
            return Err(ValidationError::NotANumber("latitude"));
        }
        if !observer.longitude.is_finite() {
            return Err(ValidationError::NotANumber("longitude"));
        }
        first_of_month(year, month).ok_or(ValidationError::InvalidYear)?;

        Ok(Self {
            year,
            month,
            observer,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Every civil day of the month, first to last. Leap years come from the
    /// calendar; the last representable month is complete too.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month;
        first_of_month(self.year, self.month)
            .into_iter()
            .flat_map(|first| first.iter_days())
            .take_while(move |day| day.month() == month)
    }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Day reports for every day of the requested month, in ascending order.
pub fn month_report<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    request: &MonthRequest,
) -> Result<Vec<DayReport>, MoonTimesError> {
    let reports = request
        .days()
        .map(|day| -> Result<DayReport, MoonTimesError> {
            let events = ephemeris.raw_events(day, request.observer())?;
            let windows = DerivedWindows::build(&events);
            let day_score = score(&events, &windows);
            debug!(
                date = %day,
                score = day_score,
                matched = matched_rules(&events, &windows).len(),
                "scored day"
            );
            Ok(DayReport::assemble(&events, &windows, day_score))
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        year = request.year,
        month = request.month,
        latitude = request.observer.latitude,
        longitude = request.observer.longitude,
        days = reports.len(),
        "computed month"
    );
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{LowPrecisionEphemeris, MoonTimes, SunTimes};
    use crate::error::EphemerisError;
    use chrono::{DateTime, Local};
    use std::cell::Cell;

    /// Ephemeris where nothing ever rises or sets.
    struct PolarNight;

    impl Ephemeris for PolarNight {
        fn sun_times(&self, _: &DateTime<Local>, _: &Observer) -> Result<SunTimes, EphemerisError> {
            Ok(SunTimes::default())
        }
        fn moon_times(
            &self,
            _: &DateTime<Local>,
            _: &Observer,
        ) -> Result<MoonTimes, EphemerisError> {
            Ok(MoonTimes::default())
        }
        fn moon_illumination(&self, _: &DateTime<Local>) -> Result<f64, EphemerisError> {
            Ok(0.6)
        }
        fn moon_distance(&self, _: &DateTime<Local>, _: &Observer) -> Result<f64, EphemerisError> {
            Ok(390_000.0)
        }
    }

    /// Ephemeris that fails on the n-th sun query.
    struct FailsOnDay {
        day: u32,
        calls: Cell<u32>,
    }

    impl Ephemeris for FailsOnDay {
        fn sun_times(&self, _: &DateTime<Local>, _: &Observer) -> Result<SunTimes, EphemerisError> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() == self.day {
                Err(EphemerisError::InstantOutOfRange(0.0))
            } else {
                Ok(SunTimes::default())
            }
        }
        fn moon_times(
            &self,
            _: &DateTime<Local>,
            _: &Observer,
        ) -> Result<MoonTimes, EphemerisError> {
            Ok(MoonTimes::default())
        }
        fn moon_illumination(&self, _: &DateTime<Local>) -> Result<f64, EphemerisError> {
            Ok(0.5)
        }
        fn moon_distance(&self, _: &DateTime<Local>, _: &Observer) -> Result<f64, EphemerisError> {
            Ok(384_400.0)
        }
    }

    fn new_york() -> Observer {
        Observer::new(40.7128, -74.0060)
    }

    fn day_count(year: i32, month: u32) -> usize {
        MonthRequest::new(year, month, new_york()).unwrap().days().count()
    }

    #[test]
    fn day_count_respects_leap_years() {
        assert_eq!(day_count(2024, 2), 29);
        assert_eq!(day_count(2023, 2), 28);
        assert_eq!(day_count(1900, 2), 28);
        assert_eq!(day_count(2000, 2), 29);
        assert_eq!(day_count(2024, 4), 30);
        assert_eq!(day_count(2024, 12), 31);
    }

    #[test]
    fn last_representable_month_is_complete() {
        let last = NaiveDate::MAX;
        let request = MonthRequest::new(last.year(), last.month(), new_york()).unwrap();
        let days: Vec<_> = request.days().collect();
        assert_eq!(days.len() as u32, last.day());
        assert_eq!(days.last(), Some(&last));
    }

    #[test]
    fn report_length_matches_calendar() {
        for (year, month, expected) in [(2024, 2, 29), (2023, 2, 28), (2024, 6, 30), (2024, 1, 31)] {
            let request = MonthRequest::new(year, month, new_york()).unwrap();
            let reports = month_report(&PolarNight, &request).unwrap();
            assert_eq!(reports.len(), expected, "{year}-{month}");
        }
    }

    #[test]
    fn dates_ascend_from_first_to_last() {
        let request = MonthRequest::new(2024, 12, new_york()).unwrap();
        let reports = month_report(&PolarNight, &request).unwrap();
        assert_eq!(reports.first().unwrap().date, "2024/12/01");
        assert_eq!(reports.last().unwrap().date, "2024/12/31");
        assert!(reports.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert_eq!(
            MonthRequest::new(2024, 13, new_york()),
            Err(ValidationError::InvalidMonth)
        );
        assert_eq!(
            MonthRequest::new(2024, 0, new_york()),
            Err(ValidationError::InvalidMonth)
        );
    }

    #[test]
    fn unrepresentable_year_is_rejected() {
        assert_eq!(
            MonthRequest::new(i32::MAX, 1, new_york()),
            Err(ValidationError::InvalidYear)
        );
    }

    #[test]
    fn polar_night_scores_zero_everywhere() {
        let request = MonthRequest::new(2024, 1, new_york()).unwrap();
        let reports = month_report(&PolarNight, &request).unwrap();
        assert!(reports.iter().all(|r| r.score == 0.0));
        assert!(reports.iter().all(|r| r.sunrise.is_none() && r.day_length.is_none()));
        assert!(reports.iter().all(|r| !r.meridian_times_available));
    }

    #[test]
    fn ephemeris_failure_aborts_the_month() {
        let eph = FailsOnDay {
            day: 10,
            calls: Cell::new(0),
        };
        let request = MonthRequest::new(2024, 6, new_york()).unwrap();
        let err = month_report(&eph, &request).unwrap_err();
        assert!(matches!(err, MoonTimesError::Ephemeris(_)));
        // stopped at the failing day
        assert_eq!(eph.calls.get(), 10);
    }

    #[test]
    fn new_york_june_has_sun_every_day() {
        let request = MonthRequest::new(2024, 6, new_york()).unwrap();
        let reports = month_report(&LowPrecisionEphemeris::new(), &request).unwrap();
        assert_eq!(reports.len(), 30);
        assert_eq!(reports[0].date, "2024/06/01");
        assert_eq!(reports[29].date, "2024/06/30");
        for report in &reports {
            assert!(report.sunrise.is_some(), "{}", report.date);
            assert!(report.sunset.is_some(), "{}", report.date);
            assert!(report.solar_noon.is_some(), "{}", report.date);
            assert!(report.score >= 0.0);
        }
    }

    #[test]
    fn identical_requests_give_identical_reports() {
        let request = MonthRequest::new(2024, 3, Observer::new(51.5074, -0.1278)).unwrap();
        let eph = LowPrecisionEphemeris::new();
        assert_eq!(
            month_report(&eph, &request).unwrap(),
            month_report(&eph, &request).unwrap()
        );
    }
}
