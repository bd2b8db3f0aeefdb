use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::intake::handlers;
use crate::features::intake::services::IntakeService;

/// Public form endpoints
pub fn routes(service: Arc<IntakeService>) -> Router {
    Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/inquire", post(handlers::submit_inquiry))
        .route("/api/newsletter", post(handlers::subscribe_newsletter))
        .with_state(service)
}
