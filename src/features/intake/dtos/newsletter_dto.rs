use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::security::sanitize_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NewsletterPreference {
    Deals,
    Updates,
    TravelTips,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterRequestDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<NewsletterPreference>>,
}

impl NewsletterRequestDto {
    pub fn sanitized(self) -> Self {
        Self {
            email: sanitize_input(&self.email),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsletterReceiptDto {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_use_kebab_case() {
        let dto: NewsletterRequestDto = serde_json::from_value(serde_json::json!({
            "email": "ana@example.com",
            "preferences": ["deals", "travel-tips"]
        }))
        .unwrap();

        assert!(dto.validate().is_ok());
        assert_eq!(
            dto.preferences,
            Some(vec![
                NewsletterPreference::Deals,
                NewsletterPreference::TravelTips
            ])
        );
    }

    #[test]
    fn test_unknown_preference_is_rejected() {
        let parsed: Result<NewsletterRequestDto, _> = serde_json::from_value(serde_json::json!({
            "email": "ana@example.com",
            "preferences": ["spam"]
        }));
        assert!(parsed.is_err());
    }
}
