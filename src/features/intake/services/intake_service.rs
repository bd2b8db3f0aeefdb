use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::ClientInfo;
use crate::features::intake::dtos::{ContactRequestDto, InquiryRequestDto, NewsletterRequestDto};
use crate::features::intake::models::{ContactSubmission, InquirySubmission, NewsletterSubscription};
use crate::modules::kv::KvStore;
use crate::shared::constants::{CONTACT_KEY_PREFIX, INQUIRY_KEY_PREFIX, NEWSLETTER_KEY_PREFIX};

/// Persists form submissions to the contacts namespace
pub struct IntakeService {
    store: Arc<dyn KvStore>,
}

impl IntakeService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Stores a validated contact form and returns its id
    pub async fn submit_contact(
        &self,
        form: ContactRequestDto,
        client: &ClientInfo,
    ) -> Result<Uuid> {
        let submission = ContactSubmission {
            id: Uuid::new_v4(),
            form: form.sanitized(),
            timestamp: Utc::now(),
            ip: client.ip.clone(),
            user_agent: client.user_agent.clone(),
        };

        self.save(CONTACT_KEY_PREFIX, submission.id, &submission, "submit contact form")
            .await?;

        tracing::info!(
            target: "analytics",
            event = "contact_form",
            contact_id = %submission.id,
            subject = submission.form.subject.as_deref().unwrap_or("general"),
            "Contact form submitted"
        );

        Ok(submission.id)
    }

    pub async fn submit_inquiry(
        &self,
        form: InquiryRequestDto,
        client: &ClientInfo,
    ) -> Result<Uuid> {
        let submission = InquirySubmission {
            id: Uuid::new_v4(),
            form: form.sanitized(),
            timestamp: Utc::now(),
            ip: client.ip.clone(),
        };

        self.save(INQUIRY_KEY_PREFIX, submission.id, &submission, "submit inquiry")
            .await?;

        tracing::info!(
            "Plan inquiry received: id={}, plan_id={}",
            submission.id,
            submission.form.plan_id
        );

        Ok(submission.id)
    }

    pub async fn subscribe(&self, form: NewsletterRequestDto) -> Result<Uuid> {
        let subscription = NewsletterSubscription {
            id: Uuid::new_v4(),
            form: form.sanitized(),
            timestamp: Utc::now(),
            active: true,
        };

        self.save(NEWSLETTER_KEY_PREFIX, subscription.id, &subscription, "subscribe")
            .await?;

        tracing::info!("Newsletter subscription created: id={}", subscription.id);

        Ok(subscription.id)
    }

    async fn save<T: Serialize>(
        &self,
        prefix: &str,
        id: Uuid,
        record: &T,
        label: &'static str,
    ) -> Result<()> {
        let key = format!("{}:{}", prefix, id);
        let payload = serde_json::to_string(record)?;

        self.store
            .put(&key, &payload, None)
            .await
            .map_err(|source| AppError::Intake { label, source })
    }
}
