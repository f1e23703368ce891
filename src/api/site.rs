//! Site-level endpoints: liveness, health probe, community stats

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::giveaway::now_timestamp;

/// Response for the liveness root
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for the health probe
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET / - Liveness check
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "RBC Community API is running!".to_string(),
    })
}

/// GET /api/health - Store connectivity probe
///
/// Always returns 200; an unreachable database is reported in the body
/// rather than as a request failure.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    match state.pool.ping().await {
        Ok(()) => Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: now_timestamp(),
            database: "connected".to_string(),
            error: None,
        }),
        Err(e) => Json(HealthResponse {
            status: "unhealthy".to_string(),
            timestamp: now_timestamp(),
            database: "disconnected".to_string(),
            error: Some(e.to_string()),
        }),
    }
}

/// GET /api/stats - Community statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.giveaway_service.stats().await?;
    Ok(Json(stats))
}
