use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::health::{handlers, HealthState};

/// `/health`, outside the API rate limit
pub fn routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
}

pub fn api_routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::api_health))
        .with_state(state)
}
