use utoipa::{Modify, OpenApi};

use crate::core::config::SwaggerConfig;
use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::health::{dtos as health_dtos, handlers as health_handlers};
use crate::features::intake::{dtos as intake_dtos, handlers as intake_handlers};
use crate::shared::types::{ApiResponse, ErrorResponse, FieldError};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health,
        health_handlers::api_health,
        // Catalog
        catalog_handlers::list_plans,
        catalog_handlers::get_plan,
        catalog_handlers::get_coverage,
        // Intake
        intake_handlers::submit_contact,
        intake_handlers::submit_inquiry,
        intake_handlers::subscribe_newsletter,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            FieldError,
            // Health
            health_dtos::HealthDto,
            health_dtos::ApiHealthDto,
            // Catalog
            catalog_dtos::PlanDto,
            catalog_dtos::PlanSummaryDto,
            catalog_dtos::CoverageDto,
            catalog_dtos::CoverageRegionDto,
            ApiResponse<Vec<catalog_dtos::PlanDto>>,
            ApiResponse<catalog_dtos::PlanSummaryDto>,
            ApiResponse<catalog_dtos::CoverageDto>,
            // Intake
            intake_dtos::PlanInterest,
            intake_dtos::DataNeeds,
            intake_dtos::NewsletterPreference,
            intake_dtos::ContactRequestDto,
            intake_dtos::TravelDatesDto,
            intake_dtos::InquiryRequestDto,
            intake_dtos::NewsletterRequestDto,
            intake_dtos::ContactReceiptDto,
            intake_dtos::InquiryReceiptDto,
            intake_dtos::NewsletterReceiptDto,
        )
    ),
    tags(
        (name = "health", description = "Liveness checks"),
        (name = "catalog", description = "eSIM plans and coverage (public)"),
        (name = "intake", description = "Contact, inquiry and newsletter forms (public)"),
    ),
    info(
        title = "MyeSIMPlus API",
        version = "1.0.0",
        description = "API documentation for MyeSIMPlus",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl From<&SwaggerConfig> for SwaggerInfoModifier {
    fn from(config: &SwaggerConfig) -> Self {
        Self {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        }
    }
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

/// The API document with info taken from config
pub fn api_doc(config: &SwaggerConfig) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier::from(config).modify(&mut openapi);
    openapi
}
