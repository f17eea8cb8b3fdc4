//! # Error Types
//!
//! Two things can stop a month computation: a request that fails validation
//! before anything is computed, and an ephemeris failure part way through.
//! Missing sun or moon events are not errors and never show up here.

use thiserror::Error;

/// Request parameters that cannot be turned into a month computation.
///
/// The `Display` text of each variant is the message returned to clients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more of latitude, longitude, year or month is absent or empty
    #[error("Latitude, Longitude, Year, and Month are required.")]
    MissingParameters,

    /// A parameter is present but does not parse as a number
    #[error("Invalid {0}. It must be a number.")]
    NotANumber(&'static str),

    /// Month outside 1–12
    #[error("Invalid month. It must be between 1 and 12.")]
    InvalidMonth,

    /// Year the calendar cannot represent
    #[error("Invalid year. It must be a valid calendar year.")]
    InvalidYear,
}

/// Failures of the astronomical computation itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    /// Coordinates outside the valid range or not finite
    #[error("observer position out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// A computed instant cannot be represented as a timestamp
    #[error("computed instant out of range (julian date {0})")]
    InstantOutOfRange(f64),
}

/// Everything that can fail while producing a month of day reports.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoonTimesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("ephemeris failure: {0}")]
    Ephemeris(#[from] EphemerisError),
}
