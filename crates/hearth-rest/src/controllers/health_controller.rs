//! Health and readiness endpoints.

use crate::state::AppState;
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    fn up() -> Self {
        Self {
            status: "UP".to_string(),
            service: "hearth".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Basic health check.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

/// Kubernetes-style liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    responses((status = 200, description = "Service is live", body = HealthResponse)),
    tag = "health"
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

/// Kubernetes-style readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses((status = 200, description = "Service is ready", body = HealthResponse)),
    tag = "health"
)]
pub async fn readiness() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

/// Creates the health routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
}
