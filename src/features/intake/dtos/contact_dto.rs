use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::security::{sanitize_input, sanitize_optional};
use crate::shared::validation::validate_phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanInterest {
    Basic,
    Premium,
    Enterprise,
    Custom,
}

/// Contact form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequestDto {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// International format; spaces, dashes and parentheses are ignored
    #[validate(custom(function = "validate_phone"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(length(
        min = 10,
        max = 1000,
        message = "Message must be 10-1000 characters"
    ))]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_interest: Option<PlanInterest>,
}

impl ContactRequestDto {
    pub fn sanitized(self) -> Self {
        Self {
            name: sanitize_input(&self.name),
            email: sanitize_input(&self.email),
            phone: sanitize_optional(self.phone),
            message: sanitize_input(&self.message),
            subject: sanitize_optional(self.subject),
            country: sanitize_optional(self.country),
            plan_interest: self.plan_interest,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceiptDto {
    pub success: bool,
    pub message: String,
    pub contact_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::flatten_errors;

    fn valid() -> ContactRequestDto {
        serde_json::from_value(serde_json::json!({
            "name": "Ana Traveler",
            "email": "ana@example.com",
            "message": "I need an eSIM for Japan next month."
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_contact_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_length_and_email_rules() {
        let dto = ContactRequestDto {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            message: "short".to_string(),
            ..valid()
        };

        let fields: Vec<String> = flatten_errors(&dto.validate().unwrap_err())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["email", "message", "name"]);
    }

    #[test]
    fn test_phone_separators_are_ignored() {
        let ok = ContactRequestDto {
            phone: Some("+1 (415) 555-2671".to_string()),
            ..valid()
        };
        assert!(ok.validate().is_ok());

        let bad = ContactRequestDto {
            phone: Some("call me".to_string()),
            ..valid()
        };
        let errors = flatten_errors(&bad.validate().unwrap_err());
        assert_eq!(errors[0].field, "phone");
        assert_eq!(errors[0].code, "phone");
    }

    #[test]
    fn test_plan_interest_is_a_closed_set() {
        let parsed: Result<ContactRequestDto, _> = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "email": "ana@example.com",
            "message": "Hello there, world",
            "planInterest": "platinum"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_sanitized_strips_markup() {
        let dto = ContactRequestDto {
            name: "  Ana <script>alert(1)</script>".to_string(),
            subject: Some("javascript:void(0)".to_string()),
            ..valid()
        }
        .sanitized();

        // Trimming happens before markup removal
        assert_eq!(dto.name, "Ana ");
        assert_eq!(dto.subject.as_deref(), Some("void(0)"));
    }
}
