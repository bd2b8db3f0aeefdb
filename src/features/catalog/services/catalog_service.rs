use rust_decimal::Decimal;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{CoverageDto, CoverageRegionDto, PlanDto, PlanSummaryDto};

const GLOBAL_COVERAGE: &str = "Global Coverage - 150+ countries";
const TOTAL_COUNTRIES: u32 = 150;

/// Read-only plan catalog built once at startup
pub struct CatalogService {
    plans: Vec<PlanDto>,
    coverage: CoverageDto,
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogService {
    pub fn new() -> Self {
        Self {
            plans: default_plans(),
            coverage: default_coverage(),
        }
    }

    pub fn list_plans(&self) -> Vec<PlanDto> {
        self.plans.clone()
    }

    /// Looks a plan up by its path segment.
    ///
    /// Anything that is not a known integer id is reported as not found.
    pub fn find_plan(&self, raw_id: &str) -> Result<PlanSummaryDto> {
        raw_id
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| self.plans.iter().find(|p| p.id == id))
            .map(PlanSummaryDto::from)
            .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))
    }

    pub fn coverage(&self) -> CoverageDto {
        self.coverage.clone()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn plan(
    id: i64,
    name: &str,
    cents: i64,
    data: &str,
    validity: &str,
    countries: &[&str],
    features: &[&str],
    popular: bool,
) -> PlanDto {
    PlanDto {
        id,
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        data: data.to_string(),
        validity: validity.to_string(),
        countries: strings(countries),
        features: strings(features),
        popular,
    }
}

fn default_plans() -> Vec<PlanDto> {
    vec![
        plan(
            1,
            "Basic Traveler",
            999,
            "1GB",
            "7 days",
            &["US", "CA", "MX"],
            &["High-speed data", "24/7 support", "Instant activation"],
            false,
        ),
        plan(
            2,
            "Premium Explorer",
            1999,
            "5GB",
            "30 days",
            &["US", "CA", "MX", "EU", "UK", "AU"],
            &[
                "High-speed data",
                "24/7 support",
                "Instant activation",
                "Hotspot sharing",
            ],
            true,
        ),
        plan(
            3,
            "Enterprise Global",
            4999,
            "20GB",
            "90 days",
            &[GLOBAL_COVERAGE],
            &[
                "High-speed data",
                "Priority support",
                "Instant activation",
                "Hotspot sharing",
                "Multi-device",
            ],
            false,
        ),
        plan(
            4,
            "Unlimited Pro",
            7999,
            "Unlimited",
            "30 days",
            &[GLOBAL_COVERAGE],
            &[
                "Unlimited data",
                "Priority support",
                "Instant activation",
                "Hotspot sharing",
                "Multi-device",
                "VPN included",
            ],
            false,
        ),
    ]
}

fn default_coverage() -> CoverageDto {
    let region = |name: &str, countries: &[&str], plans: &[i64]| CoverageRegionDto {
        name: name.to_string(),
        countries: strings(countries),
        plans: plans.to_vec(),
    };

    CoverageDto {
        regions: vec![
            region(
                "North America",
                &["United States", "Canada", "Mexico"],
                &[1, 2, 3, 4],
            ),
            region(
                "Europe",
                &[
                    "United Kingdom",
                    "Germany",
                    "France",
                    "Spain",
                    "Italy",
                    "Netherlands",
                ],
                &[2, 3, 4],
            ),
            region(
                "Asia Pacific",
                &["Japan", "South Korea", "Australia", "Singapore", "Thailand"],
                &[3, 4],
            ),
            region("Global", &["150+ countries worldwide"], &[3, 4]),
        ],
        total_countries: TOTAL_COUNTRIES,
    }
}
