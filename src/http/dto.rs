//! Data Transfer Objects for the HTTP API.
//!
//! Query parameters arrive as optional strings so that missing, empty and
//! malformed values can each be reported with their own message instead of
//! a generic extractor rejection.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::month::MonthRequest;
use crate::Observer;

/// Query parameters for `GET /api/moon-times`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoonTimesQuery {
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn coordinate(value: &str, name: &'static str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NotANumber(name))
}

fn integer(value: &str, name: &'static str) -> Result<i64, ValidationError> {
    value
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber(name))
}

impl MoonTimesQuery {
    /// Validate and convert into a [`MonthRequest`].
    ///
    /// Checks run in order: presence of all four parameters, numeric parsing,
    /// month range, calendar range of the year.
    pub fn into_request(self) -> Result<MonthRequest, ValidationError> {
        let (Some(latitude), Some(longitude), Some(year), Some(month)) = (
            present(&self.latitude),
            present(&self.longitude),
            present(&self.year),
            present(&self.month),
        ) else {
            return Err(ValidationError::MissingParameters);
        };

        let latitude = coordinate(latitude, "latitude")?;
        let longitude = coordinate(longitude, "longitude")?;
        let year = integer(year, "year")?;
        let month = integer(month, "month")?;

        let month = u32::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(ValidationError::InvalidMonth)?;
        let year = i32::try_from(year).map_err(|_| ValidationError::InvalidYear)?;

        MonthRequest::new(year, month, Observer::new(latitude, longitude))
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: &str, lon: &str, year: &str, month: &str) -> MoonTimesQuery {
        MoonTimesQuery {
            latitude: Some(lat.to_string()),
            longitude: Some(lon.to_string()),
            year: Some(year.to_string()),
            month: Some(month.to_string()),
        }
    }

    #[test]
    fn valid_query_converts() {
        let request = query("40.7128", "-74.0060", "2024", "6").into_request().unwrap();
        assert_eq!(request.year(), 2024);
        assert_eq!(request.month(), 6);
        assert_eq!(request.observer().latitude, 40.7128);
    }

    #[test]
    fn zero_coordinates_are_present() {
        assert!(query("0", "0", "2024", "1").into_request().is_ok());
    }

    #[test]
    fn missing_or_empty_values_are_missing() {
        let mut q = query("1", "2", "2024", "6");
        q.year = None;
        assert_eq!(q.into_request(), Err(ValidationError::MissingParameters));
        assert_eq!(
            query("1", "", "2024", "6").into_request(),
            Err(ValidationError::MissingParameters)
        );
    }

    #[test]
    fn missing_wins_over_bad_month() {
        let mut q = query("1", "2", "2024", "13");
        q.latitude = None;
        assert_eq!(q.into_request(), Err(ValidationError::MissingParameters));
    }

    #[test]
    fn month_range_is_checked() {
        for month in ["0", "13", "-1"] {
            assert_eq!(
                query("1", "2", "2024", month).into_request(),
                Err(ValidationError::InvalidMonth),
                "month {month}"
            );
        }
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert_eq!(
            query("north", "2", "2024", "6").into_request(),
            Err(ValidationError::NotANumber("latitude"))
        );
        assert_eq!(
            query("1", "NaN", "2024", "6").into_request(),
            Err(ValidationError::NotANumber("longitude"))
        );
        assert_eq!(
            query("1", "2", "20x4", "6").into_request(),
            Err(ValidationError::NotANumber("year"))
        );
        assert_eq!(
            query("1", "2", "2024", "June").into_request(),
            Err(ValidationError::NotANumber("month"))
        );
    }

    #[test]
    fn huge_year_is_invalid() {
        assert_eq!(
            query("1", "2", "99999999999", "6").into_request(),
            Err(ValidationError::InvalidYear)
        );
    }
}
