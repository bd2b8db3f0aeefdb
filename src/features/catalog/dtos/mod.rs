mod coverage_dto;
mod plan_dto;

pub use coverage_dto::*;
pub use plan_dto::*;
