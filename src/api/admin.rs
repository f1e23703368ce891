//! Admin API endpoints
//!
//! Login plus the mutating giveaway operations. Login is a standalone
//! shared-secret gate; it issues no token, and the mutating endpoints do not
//! re-check credentials.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};
use crate::models::GiveawayInput;

/// Request body for admin login
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

/// Response for successful gate checks (login, delete)
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
}

impl StatusResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: "success".to_string(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_login))
        .route("/giveaways", post(create_giveaway))
        .route("/giveaways/{id}", put(update_giveaway))
        .route("/giveaways/{id}", delete(delete_giveaway))
}

/// POST /api/admin/login - Check the admin password
async fn admin_login(
    State(state): State<AppState>,
    Json(credentials): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.admin_auth.verify(&credentials.password)?;
    Ok(Json(StatusResponse::success(
        "Admin authenticated successfully",
    )))
}

/// POST /api/admin/giveaways - Create a new giveaway
async fn create_giveaway(
    State(state): State<AppState>,
    Json(input): Json<GiveawayInput>,
) -> Result<impl IntoResponse, ApiError> {
    let giveaway = state.giveaway_service.create(input).await?;
    Ok(Json(giveaway))
}

/// PUT /api/admin/giveaways/{id} - Update an existing giveaway
async fn update_giveaway(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<GiveawayInput>,
) -> Result<impl IntoResponse, ApiError> {
    let giveaway = state.giveaway_service.update(&id, input).await?;
    Ok(Json(giveaway))
}

/// DELETE /api/admin/giveaways/{id} - Hard-delete a giveaway
async fn delete_giveaway(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.giveaway_service.delete(&id).await?;
    Ok(Json(StatusResponse::success(
        "Giveaway deleted successfully",
    )))
}
