use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRegionDto {
    pub name: String,
    pub countries: Vec<String>,
    /// Ids of the plans usable in this region
    pub plans: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageDto {
    pub regions: Vec<CoverageRegionDto>,
    pub total_countries: u32,
}
