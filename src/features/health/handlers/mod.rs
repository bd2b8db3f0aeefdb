use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::features::health::dtos::{ApiHealthDto, HealthDto};
use crate::features::health::HealthState;
use crate::shared::constants::SERVICE_VERSION;

const HEALTHY: &str = "healthy";

/// Service health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthDto)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<Arc<HealthState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: HEALTHY.to_string(),
        timestamp: Utc::now(),
        version: SERVICE_VERSION.to_string(),
        environment: state.environment.clone(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// API health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "API is up", body = ApiHealthDto)
    ),
    tag = "health"
)]
pub async fn api_health(State(state): State<Arc<HealthState>>) -> Json<ApiHealthDto> {
    Json(ApiHealthDto {
        status: HEALTHY.to_string(),
        service: "api".to_string(),
        timestamp: Utc::now(),
        version: state.api_version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::test_server;

    #[tokio::test]
    async fn test_health() {
        let response = test_server().get("/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["environment"], "test");
        assert!(body["uptime"].as_f64().unwrap() >= 0.0);
        // Not under the API rate limiter
        assert!(response.maybe_header("x-ratelimit-limit").is_none());
    }

    #[tokio::test]
    async fn test_api_health() {
        let response = test_server().get("/api/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "api");
        assert_eq!(body["version"], "v1");
        assert_eq!(response.header("x-ratelimit-limit"), "100");
    }
}
