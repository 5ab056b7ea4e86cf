use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the process started serving
    pub uptime: f64,
    pub environment: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiHealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// Process liveness
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.config.environment.clone(),
    })
}

/// API liveness
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "API is healthy", body = ApiHealthResponse)
    ),
    tag = "health"
)]
pub async fn api_health() -> Json<ApiHealthResponse> {
    Json(ApiHealthResponse {
        success: true,
        message: "API is healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
