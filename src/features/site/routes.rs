use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{any, get},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::features::site::handlers;
use crate::features::site::services::SiteService;
use crate::shared::constants::CACHE_IMMUTABLE_ASSET;

pub fn routes(service: Arc<SiteService>) -> Router {
    let assets = Router::new()
        .route("/styles.css", get(handlers::styles))
        .route("/app.js", get(handlers::script))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_IMMUTABLE_ASSET),
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/index.html", get(handlers::index))
        .route("/robots.txt", get(handlers::robots))
        .route("/sitemap.xml", get(handlers::sitemap))
        .nest("/static", assets)
        .fallback(handlers::not_found)
        .with_state(service)
}

/// Unknown API paths; merged into the rate-limited API router
pub fn api_fallback_routes() -> Router {
    Router::new().route("/api/{*path}", any(handlers::api_not_found))
}
