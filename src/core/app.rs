use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::{middleware, openapi};
use crate::features::analytics::{analytics_middleware, AnalyticsService};
use crate::features::catalog::{routes as catalog_routes, CatalogService};
use crate::features::health::{routes as health_routes, HealthState};
use crate::features::intake::{routes as intake_routes, IntakeService};
use crate::features::rate_limits::{rate_limit_middleware, RateLimitService};
use crate::features::site::{routes as site_routes, SiteService};
use crate::modules::kv::KvStores;

/// Everything the router hands out as state
pub struct AppServices {
    pub rate_limit: Arc<RateLimitService>,
    pub analytics: Arc<AnalyticsService>,
    pub catalog: Arc<CatalogService>,
    pub intake: Arc<IntakeService>,
    pub site: Arc<SiteService>,
    pub health: Arc<HealthState>,
}

impl AppServices {
    pub fn new(config: &Config, stores: KvStores) -> Result<Self> {
        let catalog = Arc::new(CatalogService::new());
        let site = SiteService::new(Arc::clone(&catalog))
            .map_err(|e| AppError::Internal(format!("Failed to load site templates: {}", e)))?;

        Ok(Self {
            rate_limit: Arc::new(RateLimitService::new(
                Arc::clone(&stores.analytics),
                &config.rate_limit,
            )),
            analytics: Arc::new(AnalyticsService::new(
                Arc::clone(&stores.analytics),
                config.analytics.sample_rate,
            )),
            intake: Arc::new(IntakeService::new(Arc::clone(&stores.contacts))),
            site: Arc::new(site),
            health: Arc::new(HealthState::new(
                config.app.environment.clone(),
                config.app.api_version.clone(),
            )),
            catalog,
        })
    }
}

/// Assembles routes and the middleware stack.
///
/// Layer order, outermost first: request id, trace, request id echo,
/// security headers, CORS, analytics, panic catching. Every `/api/*` path,
/// known or not, is additionally wrapped by the rate limiter.
pub fn build_router(config: &Config, services: AppServices) -> Router {
    let openapi = openapi::api_doc(&config.swagger);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::basic_auth_middleware,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Rate limited
    let api_routes = Router::new()
        .merge(health_routes::api_routes(Arc::clone(&services.health)))
        .merge(catalog_routes::routes(Arc::clone(&services.catalog)))
        .merge(intake_routes::routes(Arc::clone(&services.intake)))
        .merge(site_routes::api_fallback_routes())
        .route_layer(from_fn_with_state(
            Arc::clone(&services.rate_limit),
            rate_limit_middleware,
        ));

    let public_routes = Router::new()
        .merge(health_routes::routes(Arc::clone(&services.health)))
        .merge(site_routes::routes(Arc::clone(&services.site)));

    Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(public_routes)
        .layer(CatchPanicLayer::custom(middleware::PanicResponder {
            expose_details: !config.app.is_production(),
        }))
        .layer(from_fn_with_state(
            Arc::clone(&services.analytics),
            analytics_middleware,
        ))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(from_fn(middleware::security_headers))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
