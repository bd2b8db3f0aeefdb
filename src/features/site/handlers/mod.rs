use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::core::error::Result;
use crate::features::site::services::SiteService;
use crate::shared::constants::{CACHE_ONE_DAY, CACHE_SHORT};

const STYLES: &str = include_str!("../../../../assets/styles.css");
const SCRIPT: &str = include_str!("../../../../assets/app.js");

pub async fn index(State(service): State<Arc<SiteService>>) -> Result<impl IntoResponse> {
    let html = service.render_index()?;
    Ok(([(header::CACHE_CONTROL, CACHE_SHORT)], Html(html)))
}

pub async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLES)
}

pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT,
    )
}

pub async fn robots(State(service): State<Arc<SiteService>>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_ONE_DAY),
        ],
        service.robots(),
    )
}

pub async fn sitemap(State(service): State<Arc<SiteService>>) -> Result<impl IntoResponse> {
    let xml = service.render_sitemap(Utc::now().date_naive())?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, CACHE_ONE_DAY),
        ],
        xml,
    ))
}

/// Fallback for unmatched routes.
///
/// API paths and clients asking for JSON get a JSON body, everyone else the
/// HTML page.
pub async fn not_found(
    State(service): State<Arc<SiteService>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path();
    let wants_json = path.starts_with("/api/")
        || headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains("application/json"));

    if wants_json {
        return json_not_found(path);
    }

    match service.render_not_found() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Catch-all for unknown `/api/*` paths, mounted with the API routes so it is
/// rate limited like them.
pub async fn api_not_found(uri: Uri) -> Response {
    json_not_found(uri.path())
}

fn json_not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not Found", "status": 404, "path": path })),
    )
        .into_response()
}
