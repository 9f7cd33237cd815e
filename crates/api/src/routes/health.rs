//! Health check endpoints.

use axum::{extract::State, http::StatusCode, Json};
use telemetry::{health, metrics};

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health - Component report plus store and cache figures.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = health().report();
    let service = &state.service;

    Json(HealthResponse {
        status: report.status,
        store_backend: service.store().backend().to_string(),
        store_connected: health().store.is_healthy(),
        cache_entries: service.cache().entry_count(),
        requests: metrics().total_requests(),
        components: report.components,
    })
}

/// GET /health/ready - 503 until the store answers a ping.
pub async fn ready_handler() -> StatusCode {
    if health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - 200 while the process serves requests.
pub async fn live_handler() -> StatusCode {
    if health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
