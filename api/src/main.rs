//! Concierge API Server
//!
//! Business directory for a booking platform: registers businesses, keeps
//! their attributes normalized and exposes their owners, staff, services,
//! bookings and category.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod presenters;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresBusinessRepository, PostgresCategoryRepository, PostgresUserRepository};
use app::{BusinessService, CategoryService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub business_service: Arc<
        BusinessService<
            PostgresBusinessRepository,
            PostgresUserRepository,
            PostgresCategoryRepository,
        >,
    >,
    pub category_service: Arc<CategoryService<PostgresCategoryRepository>>,
    pub public_base_url: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,concierge_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Concierge API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let business_repo = Arc::new(PostgresBusinessRepository::new(db.clone()));
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let category_repo = Arc::new(PostgresCategoryRepository::new(db));

    // Create application services
    let business_service = Arc::new(BusinessService::new(
        business_repo,
        user_repo,
        category_repo.clone(),
    ));
    let category_service = Arc::new(CategoryService::new(category_repo));

    let state = AppState {
        business_service,
        category_service,
        public_base_url: config.public_base_url.clone(),
    };

    // Writes are rate limited per client IP
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .context("Failed to build governor config")?,
    );
    let limited = || GovernorLayer {
        config: governor_config.clone(),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route(
            "/businesses",
            get(handlers::list_businesses)
                .merge(post(handlers::register_business).layer(limited())),
        )
        .route(
            "/businesses/:business",
            get(handlers::get_business).merge(
                patch(handlers::update_business)
                    .delete(handlers::delete_business)
                    .layer(limited()),
            ),
        )
        .route(
            "/businesses/:business/owners",
            get(handlers::list_owners).merge(post(handlers::add_owner).layer(limited())),
        )
        .route("/businesses/:business/card", get(handlers::get_business_card))
        .route(
            "/categories",
            get(handlers::list_categories).merge(post(handlers::create_category).layer(limited())),
        )
        .route("/categories/:slug", get(handlers::get_category))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
