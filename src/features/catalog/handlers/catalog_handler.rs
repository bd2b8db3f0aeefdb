use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::core::error::Result;
use crate::features::catalog::dtos::{CoverageDto, PlanDto, PlanSummaryDto};
use crate::features::catalog::services::CatalogService;
use crate::shared::constants::CACHE_SHORT;
use crate::shared::types::{ApiResponse, ErrorResponse};

/// List all plans
#[utoipa::path(
    get,
    path = "/api/plans",
    responses(
        (status = 200, description = "Plan catalog", body = ApiResponse<Vec<PlanDto>>),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn list_plans(State(service): State<Arc<CatalogService>>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, CACHE_SHORT)],
        Json(ApiResponse::timestamped(service.list_plans())),
    )
}

/// Get a plan summary by id
#[utoipa::path(
    get,
    path = "/api/plans/{id}",
    params(
        ("id" = i64, Path, description = "Plan id")
    ),
    responses(
        (status = 200, description = "Plan found", body = ApiResponse<PlanSummaryDto>),
        (status = 404, description = "Plan not found", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn get_plan(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlanSummaryDto>>> {
    let plan = service.find_plan(&id)?;
    Ok(Json(ApiResponse::success(Some(plan), None)))
}

/// Coverage regions and their plans
#[utoipa::path(
    get,
    path = "/api/coverage",
    responses(
        (status = 200, description = "Coverage regions", body = ApiResponse<CoverageDto>)
    ),
    tag = "catalog"
)]
pub async fn get_coverage(
    State(service): State<Arc<CatalogService>>,
) -> Json<ApiResponse<CoverageDto>> {
    Json(ApiResponse::success(Some(service.coverage()), None))
}
