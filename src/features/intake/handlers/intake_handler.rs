use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, ClientInfo};
use crate::features::intake::dtos::{
    ContactReceiptDto, ContactRequestDto, InquiryReceiptDto, InquiryRequestDto,
    NewsletterReceiptDto, NewsletterRequestDto,
};
use crate::features::intake::services::IntakeService;
use crate::shared::types::ErrorResponse;

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequestDto,
    responses(
        (status = 200, description = "Message received", body = ContactReceiptDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Submission could not be stored", body = ErrorResponse)
    ),
    tag = "intake"
)]
pub async fn submit_contact(
    State(service): State<Arc<IntakeService>>,
    client: ClientInfo,
    AppJson(dto): AppJson<ContactRequestDto>,
) -> Result<Json<ContactReceiptDto>> {
    dto.validate()?;

    let contact_id = service.submit_contact(dto, &client).await?;
    Ok(Json(ContactReceiptDto {
        success: true,
        message: "Thank you for your message. We will get back to you within 24 hours."
            .to_string(),
        contact_id,
    }))
}

/// Ask for details about a plan
#[utoipa::path(
    post,
    path = "/api/inquire",
    request_body = InquiryRequestDto,
    responses(
        (status = 200, description = "Inquiry received", body = InquiryReceiptDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Submission could not be stored", body = ErrorResponse)
    ),
    tag = "intake"
)]
pub async fn submit_inquiry(
    State(service): State<Arc<IntakeService>>,
    client: ClientInfo,
    AppJson(dto): AppJson<InquiryRequestDto>,
) -> Result<Json<InquiryReceiptDto>> {
    dto.validate()?;

    let inquiry_id = service.submit_inquiry(dto, &client).await?;
    Ok(Json(InquiryReceiptDto {
        success: true,
        message: "Plan inquiry received. We will send you detailed information shortly."
            .to_string(),
        inquiry_id,
    }))
}

/// Subscribe to the newsletter
#[utoipa::path(
    post,
    path = "/api/newsletter",
    request_body = NewsletterRequestDto,
    responses(
        (status = 200, description = "Subscribed", body = NewsletterReceiptDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Subscription could not be stored", body = ErrorResponse)
    ),
    tag = "intake"
)]
pub async fn subscribe_newsletter(
    State(service): State<Arc<IntakeService>>,
    AppJson(dto): AppJson<NewsletterRequestDto>,
) -> Result<Json<NewsletterReceiptDto>> {
    dto.validate()?;

    service.subscribe(dto).await?;
    Ok(Json(NewsletterReceiptDto {
        success: true,
        message: "Successfully subscribed to newsletter!".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::modules::kv::{KvStores, MemoryKvStore};
    use crate::shared::test_helpers::{
        recording_stores, test_config, test_server, test_server_with, FailingKvStore,
    };

    #[tokio::test]
    async fn test_contact_is_stored_and_acknowledged() {
        let (stores, contacts) = recording_stores();
        let server = test_server_with(&test_config(), stores);

        let response = server
            .post("/api/contact")
            .json(&json!({
                "name": "Ana Traveler",
                "email": "ana@example.com",
                "phone": "+81 90-1234-5678",
                "message": "Which plan works in Japan?",
                "planInterest": "premium"
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(
            body["message"],
            "Thank you for your message. We will get back to you within 24 hours."
        );
        let contact_id = body["contactId"].as_str().unwrap();
        assert_eq!(
            contacts.keys_with_prefix("contact:"),
            vec![format!("contact:{}", contact_id)]
        );
    }

    #[tokio::test]
    async fn test_contact_validation_error_shape() {
        let server = test_server();

        let response = server
            .post("/api/contact")
            .json(&json!({
                "name": "A",
                "email": "nope",
                "message": "hi"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["message"], "Invalid input data");
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["email", "message", "name"]);
        assert_eq!(body["details"][0]["code"], "email");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = test_server();

        let response = server
            .post("/api/contact")
            .content_type("application/json")
            .bytes("{\"name\":".into())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Bad Request");
    }

    #[tokio::test]
    async fn test_inquiry_returns_inquiry_id() {
        let (stores, contacts) = recording_stores();
        let server = test_server_with(&test_config(), stores);

        let response = server
            .post("/api/inquire")
            .json(&json!({
                "planId": 3,
                "email": "ops@example.com",
                "country": "DE",
                "travelDates": {
                    "start": "2025-09-01T00:00:00Z",
                    "end": "2025-09-14T00:00:00Z"
                },
                "dataNeeds": "heavy"
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let inquiry_id = body["inquiryId"].as_str().unwrap();
        assert_eq!(
            contacts.keys_with_prefix("inquiry:"),
            vec![format!("inquiry:{}", inquiry_id)]
        );
    }

    #[tokio::test]
    async fn test_inquiry_reports_nested_date_errors() {
        let server = test_server();

        let response = server
            .post("/api/inquire")
            .json(&json!({
                "planId": 1,
                "email": "ops@example.com",
                "country": "DE",
                "travelDates": { "start": "tomorrow", "end": "2025-09-14T00:00:00Z" }
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["details"][0]["field"], "travelDates.start");
    }

    #[tokio::test]
    async fn test_newsletter_subscription() {
        let server = test_server();

        let response = server
            .post("/api/newsletter")
            .json(&json!({ "email": "ana@example.com", "preferences": ["deals"] }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Successfully subscribed to newsletter!");
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let stores = KvStores {
            analytics: Arc::new(MemoryKvStore::new()),
            contacts: Arc::new(FailingKvStore::writes()),
        };
        let server = test_server_with(&test_config(), stores);

        let response = server
            .post("/api/newsletter")
            .json(&json!({ "email": "ana@example.com" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Failed to subscribe");
        assert_eq!(body["message"], "Please try again later");
    }
}
