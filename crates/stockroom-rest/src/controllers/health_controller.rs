//! Health check controller.

use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use stockroom_core::StockroomResult;
use tracing::warn;

/// Probe for the backing services the API depends on.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Checks that backing services can serve requests.
    async fn ready(&self) -> StockroomResult<()>;
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Creates the health router.
pub fn router(probe: Arc<dyn ReadinessProbe>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(probe)
}

/// Health check endpoint. Reports 503 when the backing store is unreachable.
pub async fn health_check(State(probe): State<Arc<dyn ReadinessProbe>>) -> Response {
    let (status_code, status) = match probe.ready().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
        .into_response()
}
