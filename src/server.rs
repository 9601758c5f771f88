//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::ScoringService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scoring: Arc<ScoringService>,
}

/// Create application state, loading the score tables from `config.data_dir`.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let scoring = ScoringService::load(&config.data_dir, config.parallel_threshold).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load score tables from {}: {e}",
            config.data_dir.display()
        )
    })?;

    Ok(AppState {
        config: Arc::new(config),
        scoring: Arc::new(scoring),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/score", post(handle_score))
        .route("/api/batch/pairs", post(handle_batch_pairs))
        .route("/api/batch/penalty", post(handle_batch_penalty))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_score(
    State(state): State<AppState>,
    request: Json<api::ScoreRequest>,
) -> Result<Json<api::ScoreResponse>, ApiError> {
    api::handle_score(State(state.config), State(state.scoring), request).await
}

async fn handle_batch_pairs(
    State(state): State<AppState>,
    request: Json<api::PairBatchRequest>,
) -> Result<Json<api::BatchResponse>, ApiError> {
    api::handle_batch_pairs(State(state.scoring), request).await
}

async fn handle_batch_penalty(
    State(state): State<AppState>,
    request: Json<api::PenaltyBatchRequest>,
) -> Result<Json<api::BatchResponse>, ApiError> {
    api::handle_batch_penalty(State(state.scoring), request).await
}
