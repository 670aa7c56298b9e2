pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::repository::{BlogRepository, InquiryRepository};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn BlogRepository>,
    pub inquiries: Arc<dyn InquiryRepository>,
    pub config: Config,
}

/// Full HTTP surface: health probe plus the versioned API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api::routes(state.clone()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.repo.health_check().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::warn!(error = ?e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
        }
    }
}
