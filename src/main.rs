//! RBC Community API - giveaway promotions backend

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rbc_community_api::{
    api::{self, AppState},
    config::Config,
    db::{self, repositories::SqlxGiveawayRepository},
    services::{admin::AdminAuth, giveaway::GiveawayService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rbc_community_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RBC Community API...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Wire up the giveaway service
    let giveaway_repo = SqlxGiveawayRepository::boxed(pool.clone());
    let giveaway_service = Arc::new(GiveawayService::new(giveaway_repo));
    let admin_auth = Arc::new(AdminAuth::new(config.admin.password.clone()));

    let state = AppState {
        pool: pool.clone(),
        giveaway_service,
        admin_auth,
    };

    // Build router
    let app = api::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
