//! Shared API state and error translation
//!
//! `AppState` carries the store handle and services into every handler.
//! `ApiError` is the single translation point from domain error kinds to
//! HTTP status codes: every failure is reported immediately with its
//! message, never swallowed or retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::admin::{AdminAuth, AdminAuthError};
use crate::services::giveaway::{GiveawayService, GiveawayServiceError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: crate::db::DynDatabasePool,
    pub giveaway_service: Arc<GiveawayService>,
    pub admin_auth: Arc<AdminAuth>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<GiveawayServiceError> for ApiError {
    fn from(err: GiveawayServiceError) -> Self {
        match &err {
            GiveawayServiceError::NotFound(_) => Self::not_found(err.to_string()),
            GiveawayServiceError::InvalidDateFormat(_)
            | GiveawayServiceError::EndDateNotInFuture
            | GiveawayServiceError::Validation(_) => Self::validation_error(err.to_string()),
            GiveawayServiceError::Internal(_) => Self::internal_error(err.to_string()),
        }
    }
}

impl From<AdminAuthError> for ApiError {
    fn from(err: AdminAuthError) -> Self {
        match err {
            AdminAuthError::InvalidPassword => Self::unauthorized(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_map_to_codes() {
        let not_found: ApiError = GiveawayServiceError::NotFound("x".into()).into();
        assert_eq!(not_found.error.code, "NOT_FOUND");

        let bad_date: ApiError = GiveawayServiceError::InvalidDateFormat("z".into()).into();
        assert_eq!(bad_date.error.code, "VALIDATION_ERROR");

        let past: ApiError = GiveawayServiceError::EndDateNotInFuture.into();
        assert_eq!(past.error.code, "VALIDATION_ERROR");

        let internal: ApiError = GiveawayServiceError::Internal(anyhow::anyhow!("boom")).into();
        assert_eq!(internal.error.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_auth_error_maps_to_unauthorized() {
        let err: ApiError = AdminAuthError::InvalidPassword.into();
        assert_eq!(err.error.code, "UNAUTHORIZED");
    }
}
