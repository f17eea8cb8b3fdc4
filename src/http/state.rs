//! Application state for the HTTP server.

use std::sync::Arc;

use crate::ephemeris::{Ephemeris, LowPrecisionEphemeris};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of sun and moon events
    pub ephemeris: Arc<dyn Ephemeris + Send + Sync>,
}

impl AppState {
    /// Create a new application state with the given ephemeris.
    pub fn new(ephemeris: Arc<dyn Ephemeris + Send + Sync>) -> Self {
        Self { ephemeris }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(LowPrecisionEphemeris::new()))
    }
}
