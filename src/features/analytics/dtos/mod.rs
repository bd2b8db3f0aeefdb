mod analytics_dto;

pub use analytics_dto::{AnalyticsRecord, RequestMetadata};
