//! Public giveaway listing endpoints

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

use crate::api::middleware::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_giveaways))
        .route("/active", get(list_active_giveaways))
}

/// GET /api/giveaways - All giveaways, newest first
async fn list_giveaways(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let giveaways = state.giveaway_service.list_all().await?;
    Ok(Json(giveaways))
}

/// GET /api/giveaways/active - Giveaways that have not ended yet,
/// soonest-ending first
async fn list_active_giveaways(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let giveaways = state.giveaway_service.list_active().await?;
    Ok(Json(giveaways))
}
