use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogService;

pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/plans", get(handlers::list_plans))
        .route("/api/plans/{id}", get(handlers::get_plan))
        .route("/api/coverage", get(handlers::get_coverage))
        .with_state(service)
}
