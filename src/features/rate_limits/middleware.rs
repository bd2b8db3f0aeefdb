use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::config::RateLimitScope;
use crate::features::rate_limits::services::{RateLimitDecision, RateLimitService};
use crate::shared::security::{client_ip, rate_limit_key};
use crate::shared::types::ErrorResponse;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

pub async fn rate_limit_middleware(
    State(service): State<Arc<RateLimitService>>,
    req: Request,
    next: Next,
) -> Response {
    let ip = client_ip(req.headers());
    let key = match service.scope() {
        RateLimitScope::Global => rate_limit_key(&ip, None),
        RateLimitScope::Endpoint => {
            let endpoint = req
                .extensions()
                .get::<MatchedPath>()
                .map(|p| p.as_str().to_string())
                .unwrap_or_else(|| req.uri().path().to_string());
            rate_limit_key(&ip, Some(&endpoint))
        }
    };

    let now_ms = chrono::Utc::now().timestamp_millis();

    match service.check(&key, now_ms).await {
        RateLimitDecision::Admitted {
            limit,
            remaining,
            reset_at,
        } => {
            let mut response = next.run(req).await;
            set_quota_headers(response.headers_mut(), limit, remaining, reset_at);
            response
        }
        RateLimitDecision::Rejected {
            limit,
            retry_after,
            reset_at,
        } => {
            tracing::info!("Rate limit exceeded for {}", ip);
            too_many_requests(&service, limit, retry_after, reset_at)
        }
        RateLimitDecision::FailedOpen => next.run(req).await,
    }
}

fn set_quota_headers(headers: &mut HeaderMap, limit: u32, remaining: u32, reset_at: u64) {
    headers.insert(LIMIT_HEADER, HeaderValue::from(limit));
    headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
    headers.insert(RESET_HEADER, HeaderValue::from(reset_at));
}

fn too_many_requests(
    service: &RateLimitService,
    limit: u32,
    retry_after: u64,
    reset_at: u64,
) -> Response {
    let window_secs = service.window_ms() as f64 / 1000.0;
    let body = ErrorResponse {
        retry_after: Some(retry_after),
        ..ErrorResponse::new(
            "Rate limit exceeded",
            Some(format!(
                "Too many requests. Limit: {} per {} seconds",
                limit, window_secs
            )),
        )
    };

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    let headers = response.headers_mut();
    headers.insert("retry-after", HeaderValue::from(retry_after));
    set_quota_headers(headers, limit, 0, reset_at);
    response
}
