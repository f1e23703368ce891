//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints for the RBC Community API:
//! - Public giveaway listings
//! - Admin login and giveaway mutations
//! - Liveness, health, and stats endpoints

pub mod admin;
pub mod giveaways;
pub mod middleware;
pub mod site;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use middleware::{ApiError, AppState};

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    // All origins/methods/headers are permitted; the frontend is served
    // from a separate origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(site::health_check))
        .route("/stats", get(site::get_stats))
        .nest("/giveaways", giveaways::router())
        .nest("/admin", admin::router());

    Router::new()
        .route("/", get(site::root))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxGiveawayRepository;
    use crate::db::{create_test_pool, migrations};
    use crate::models::giveaway::format_timestamp;
    use crate::services::{admin::AdminAuth, giveaway::GiveawayService};
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;

    const TEST_PASSWORD: &str = "test-admin-password";

    async fn test_server() -> TestServer {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();

        let state = AppState {
            pool: pool.clone(),
            giveaway_service: Arc::new(GiveawayService::new(SqlxGiveawayRepository::boxed(pool))),
            admin_auth: Arc::new(AdminAuth::new(TEST_PASSWORD)),
        };

        TestServer::new(build_router(state)).unwrap()
    }

    fn giveaway_body(title: &str, end_date: &str) -> Value {
        json!({
            "title": title,
            "description": "A community giveaway",
            "prize": "Gift card",
            "endDate": end_date,
            "entryRequirement": "Join the Discord",
        })
    }

    fn future_date(days: i64) -> String {
        format_timestamp(Utc::now() + Duration::days(days))
    }

    fn past_date(days: i64) -> String {
        format_timestamp(Utc::now() - Duration::days(days))
    }

    #[tokio::test]
    async fn test_root_liveness() {
        let server = test_server().await;
        let resp = server.get("/").await;
        assert_eq!(resp.status_code(), 200);
        let body: Value = resp.json();
        assert!(body["message"].as_str().unwrap().contains("running"));
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let server = test_server().await;
        let resp = server.get("/api/health").await;
        assert_eq!(resp.status_code(), 200);
        let body: Value = resp.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_admin_login() {
        let server = test_server().await;

        let ok = server
            .post("/api/admin/login")
            .json(&json!({ "password": TEST_PASSWORD }))
            .await;
        assert_eq!(ok.status_code(), 200);
        let body: Value = ok.json();
        assert_eq!(body["status"], "success");

        let bad = server
            .post("/api/admin/login")
            .json(&json!({ "password": "wrong" }))
            .await;
        assert_eq!(bad.status_code(), 401);

        let empty = server
            .post("/api/admin/login")
            .json(&json!({ "password": "" }))
            .await;
        assert_eq!(empty.status_code(), 401);
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let server = test_server().await;
        let resp = server
            .post("/api/admin/giveaways")
            .json(&giveaway_body("Launch", &future_date(7)))
            .await;
        assert_eq!(resp.status_code(), 200);

        let body: Value = resp.json();
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert_eq!(body["title"], "Launch");
        assert_eq!(body["entryRequirement"], "Join the Discord");
        assert!(body.get("createdAt").is_some());
        assert!(body.get("updatedAt").is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_past_date() {
        let server = test_server().await;
        let resp = server
            .post("/api/admin/giveaways")
            .json(&giveaway_body("Late", &past_date(1)))
            .await;
        assert_eq!(resp.status_code(), 400);
        let body: Value = resp.json();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_date() {
        let server = test_server().await;
        let resp = server
            .post("/api/admin/giveaways")
            .json(&giveaway_body("Bad", "not-a-date"))
            .await;
        assert_eq!(resp.status_code(), 400);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let server = test_server().await;
        // Schema validation at the boundary: the JSON extractor rejects
        // bodies missing required fields before the service runs.
        let resp = server
            .post("/api/admin/giveaways")
            .json(&json!({ "title": "Only a title" }))
            .await;
        assert!(resp.status_code().is_client_error());
    }

    #[tokio::test]
    async fn test_update_nonexistent_returns_404_without_creating() {
        let server = test_server().await;
        let resp = server
            .put("/api/admin/giveaways/no-such-id")
            .json(&giveaway_body("Ghost", &future_date(1)))
            .await;
        assert_eq!(resp.status_code(), 404);

        let all: Value = server.get("/api/giveaways").await.json();
        assert_eq!(all.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_stats_match_listings() {
        let server = test_server().await;
        server
            .post("/api/admin/giveaways")
            .json(&giveaway_body("One", &future_date(3)))
            .await;
        server
            .post("/api/admin/giveaways")
            .json(&giveaway_body("Two", &future_date(5)))
            .await;

        let stats: Value = server.get("/api/stats").await.json();
        let all: Value = server.get("/api/giveaways").await.json();
        let active: Value = server.get("/api/giveaways/active").await.json();

        assert_eq!(
            stats["totalGiveaways"].as_i64().unwrap(),
            all.as_array().unwrap().len() as i64
        );
        assert_eq!(
            stats["activeGiveaways"].as_i64().unwrap(),
            active.as_array().unwrap().len() as i64
        );
        assert_eq!(stats["memberCount"], 500);
        assert_eq!(stats["communityStatus"], "active");
    }

    #[tokio::test]
    async fn test_active_listing_orders_by_end_date() {
        let server = test_server().await;
        server
            .post("/api/admin/giveaways")
            .json(&giveaway_body("Later", &future_date(10)))
            .await;
        server
            .post("/api/admin/giveaways")
            .json(&giveaway_body("Sooner", &future_date(2)))
            .await;

        let active: Value = server.get("/api/giveaways/active").await.json();
        let titles: Vec<&str> = active
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);
    }

    #[tokio::test]
    async fn test_giveaway_lifecycle() {
        let server = test_server().await;

        // Create a giveaway ending in 7 days
        let created: Value = server
            .post("/api/admin/giveaways")
            .json(&giveaway_body("Lifecycle", &future_date(7)))
            .await
            .json();
        let id = created["id"].as_str().unwrap().to_string();

        // Appears in both listings
        let all: Value = server.get("/api/giveaways").await.json();
        let active: Value = server.get("/api/giveaways/active").await.json();
        assert_eq!(all.as_array().unwrap().len(), 1);
        assert_eq!(active.as_array().unwrap().len(), 1);

        // Retarget endDate to yesterday (allowed on update)
        let updated = server
            .put(&format!("/api/admin/giveaways/{}", id))
            .json(&giveaway_body("Lifecycle", &past_date(1)))
            .await;
        assert_eq!(updated.status_code(), 200);
        let updated: Value = updated.json();
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["createdAt"], created["createdAt"]);
        assert!(updated.get("updatedAt").is_some());

        // Still listed, but no longer active
        let all: Value = server.get("/api/giveaways").await.json();
        let active: Value = server.get("/api/giveaways/active").await.json();
        assert_eq!(all.as_array().unwrap().len(), 1);
        assert_eq!(active.as_array().unwrap().len(), 0);

        // Delete removes it
        let deleted = server.delete(&format!("/api/admin/giveaways/{}", id)).await;
        assert_eq!(deleted.status_code(), 200);
        let all: Value = server.get("/api/giveaways").await.json();
        assert_eq!(all.as_array().unwrap().len(), 0);

        // Second delete reports NotFound
        let again = server.delete(&format!("/api/admin/giveaways/{}", id)).await;
        assert_eq!(again.status_code(), 404);
        let body: Value = again.json();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
