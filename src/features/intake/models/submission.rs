use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::intake::dtos::{ContactRequestDto, InquiryRequestDto, NewsletterRequestDto};

/// Stored at `contact:{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    #[serde(flatten)]
    pub form: ContactRequestDto,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
}

/// Stored at `inquiry:{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquirySubmission {
    pub id: Uuid,
    #[serde(flatten)]
    pub form: InquiryRequestDto,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
}

/// Stored at `newsletter:{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: Uuid,
    #[serde(flatten)]
    pub form: NewsletterRequestDto,
    pub timestamp: DateTime<Utc>,
    pub active: bool,
}
