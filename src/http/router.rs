//! Router configuration for the HTTP API.
//!
//! This module sets up the routes and middleware (CORS, tracing) and creates
//! the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Read-only public data, so any origin may query it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/moon-times", get(handlers::moon_times))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
