//! HTTP handlers for the REST API.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use super::dto::{HealthResponse, MoonTimesQuery};
use super::error::AppError;
use super::state::AppState;
use crate::month::month_report;
use crate::report::DayReport;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/moon-times
///
/// Day reports for every day of the requested month. Validation happens
/// before any computation; the month itself is computed on the blocking pool.
/// A query string that does not deserialize is a 400 with the usual error body.
pub async fn moon_times(
    State(state): State<AppState>,
    query: Result<Query<MoonTimesQuery>, QueryRejection>,
) -> HandlerResult<Vec<DayReport>> {
    let Query(query) = query?;
    let request = query.into_request()?;

    let reports = tokio::task::spawn_blocking(move || {
        month_report(state.ephemeris.as_ref(), &request)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(reports))
}
