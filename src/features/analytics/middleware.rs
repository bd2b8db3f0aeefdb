use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::features::analytics::dtos::{AnalyticsRecord, RequestMetadata};
use crate::features::analytics::services::AnalyticsService;

pub async fn analytics_middleware(
    State(service): State<Arc<AnalyticsService>>,
    req: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let metadata = RequestMetadata::capture(req.method(), req.uri(), req.headers(), Utc::now());

    let response = next.run(req).await;

    let duration = started.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    tracing::info!(
        target: "analytics",
        request_id = %metadata.request_id,
        method = %metadata.method,
        url = %metadata.url,
        status,
        duration_ms = duration,
        country = %metadata.country,
        "request completed"
    );

    if service.should_sample() {
        service.record_detached(AnalyticsRecord::new(metadata, status, duration));
    }

    response
}
