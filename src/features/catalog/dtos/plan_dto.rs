use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full catalog entry as listed on `/api/plans`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanDto {
    pub id: i64,
    pub name: String,
    /// USD, serialized as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
    /// Data allowance, e.g. `5GB` or `Unlimited`
    pub data: String,
    pub validity: String,
    pub countries: Vec<String>,
    pub features: Vec<String>,
    pub popular: bool,
}

/// Condensed plan returned by the single-plan lookup
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummaryDto {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
    pub data: String,
    pub validity: String,
}

impl From<&PlanDto> for PlanSummaryDto {
    fn from(plan: &PlanDto) -> Self {
        Self {
            id: plan.id,
            name: plan.name.clone(),
            price: plan.price,
            data: plan.data.clone(),
            validity: plan.validity.clone(),
        }
    }
}
