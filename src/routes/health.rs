//! Health check endpoint.
//!
//! A liveness probe: returns 200 with a fixed message whenever the process can
//! answer HTTP. It takes no state, so storage outages never affect it.

use crate::config::HEALTH_MESSAGE;

/// Health check handler.
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}
