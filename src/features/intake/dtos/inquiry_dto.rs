use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::shared::security::sanitize_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataNeeds {
    Light,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TravelDatesDto {
    /// RFC 3339 timestamp
    #[validate(custom(function = "validate_datetime"))]
    pub start: String,

    #[validate(custom(function = "validate_datetime"))]
    pub end: String,
}

/// Plan inquiry submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequestDto {
    #[validate(range(min = 1, message = "Plan id must be a positive integer"))]
    pub plan_id: i64,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 2, message = "Country code required"))]
    pub country: String,

    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_dates: Option<TravelDatesDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_needs: Option<DataNeeds>,
}

impl InquiryRequestDto {
    pub fn sanitized(self) -> Self {
        Self {
            email: sanitize_input(&self.email),
            country: sanitize_input(&self.country),
            travel_dates: self.travel_dates.map(|dates| TravelDatesDto {
                start: sanitize_input(&dates.start),
                end: sanitize_input(&dates.end),
            }),
            ..self
        }
    }
}

fn validate_datetime(value: &str) -> Result<(), ValidationError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("invalid_string");
            err.message = Some(Cow::Borrowed("Invalid datetime"));
            err
        })
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryReceiptDto {
    pub success: bool,
    pub message: String,
    pub inquiry_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::flatten_errors;

    fn inquiry(value: serde_json::Value) -> InquiryRequestDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_inquiry_is_valid() {
        let dto = inquiry(serde_json::json!({
            "planId": 2,
            "email": "ana@example.com",
            "country": "JP"
        }));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_plan_id_must_be_positive() {
        let dto = inquiry(serde_json::json!({
            "planId": 0,
            "email": "ana@example.com",
            "country": "JP"
        }));

        let errors = flatten_errors(&dto.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "planId");
    }

    #[test]
    fn test_travel_dates_are_checked_with_nested_paths() {
        let dto = inquiry(serde_json::json!({
            "planId": 1,
            "email": "ana@example.com",
            "country": "J",
            "travelDates": { "start": "2025-07-01T00:00:00Z", "end": "next week" }
        }));

        let fields: Vec<String> = flatten_errors(&dto.validate().unwrap_err())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["country", "travelDates.end"]);
    }

    #[test]
    fn test_data_needs_is_a_closed_set() {
        let parsed: Result<InquiryRequestDto, _> = serde_json::from_value(serde_json::json!({
            "planId": 1,
            "email": "ana@example.com",
            "country": "JP",
            "dataNeeds": "extreme"
        }));
        assert!(parsed.is_err());
    }
}
