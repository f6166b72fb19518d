//! HTTP API: `/health`, `/predict`, `/predict_batch`

pub mod error;
pub mod handlers;

use crate::application::scoring::ScoringService;
use crate::infrastructure::observability::Metrics;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use handlers::{BatchRequest, HealthResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ScoringService>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(service: Arc<ScoringService>, metrics: Metrics) -> Self {
        Self { service, metrics }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/predict_batch", post(handlers::predict_batch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
