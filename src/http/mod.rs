//! HTTP surface of the moon times service.
//!
//! A single query endpoint plus a health check, served with axum:
//!
//! ```text
//! GET /api/moon-times?latitude=..&longitude=..&year=..&month=..
//!     200  [DayReport, ...]           one per day of the month
//!     400  {"error": "..."}           missing or invalid parameter
//!     500  {"error": "..."}           ephemeris failure
//! GET /health
//!     200  {"status": "ok", "version": "..."}
//! ```
//!
//! Handlers only parse and validate; the month computation runs on the
//! blocking thread pool through [`crate::month::month_report`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
