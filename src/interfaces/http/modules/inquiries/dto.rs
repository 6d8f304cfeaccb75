//! Inquiry DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::InquiryThread;
use crate::domain::{Inquiry, InquiryResponse};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInquiryRequest {
    /// TOUR, GUIDE, DRIVER or COMPANY
    #[schema(example = "GUIDE")]
    pub target_type: String,
    #[validate(length(min = 1, max = 20, message = "must list 1-20 targets"))]
    pub target_ids: Vec<String>,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "must be 1-5000 characters"))]
    pub message: String,
    /// `YYYY-MM-DD`
    pub requested_date: Option<String>,
    pub guests: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RespondInquiryRequest {
    /// RESPONDED, ACCEPTED or DECLINED
    #[schema(example = "ACCEPTED")]
    pub status: String,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InquiryDto {
    pub id: String,
    pub user_id: String,
    pub target_type: String,
    pub target_ids: Vec<String>,
    pub subject: String,
    pub message: String,
    pub requested_date: Option<String>,
    pub guests: Option<i32>,
    pub created_at: String,
}

impl From<Inquiry> for InquiryDto {
    fn from(i: Inquiry) -> Self {
        Self {
            id: i.id,
            user_id: i.user_id,
            target_type: i.target_type.as_str().to_string(),
            target_ids: i.target_ids,
            subject: i.subject,
            message: i.message,
            requested_date: i.requested_date.map(|d| d.format("%Y-%m-%d").to_string()),
            guests: i.guests,
            created_at: i.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InquiryResponseDto {
    pub id: String,
    pub inquiry_id: String,
    pub recipient_id: String,
    /// PENDING, RESPONDED, ACCEPTED, DECLINED or EXPIRED
    pub status: String,
    pub message: Option<String>,
    pub responded_at: Option<String>,
    pub created_at: String,
}

impl From<InquiryResponse> for InquiryResponseDto {
    fn from(r: InquiryResponse) -> Self {
        Self {
            id: r.id,
            inquiry_id: r.inquiry_id,
            recipient_id: r.recipient_id,
            status: r.status.as_str().to_string(),
            message: r.message,
            responded_at: r.responded_at.map(|t| t.to_rfc3339()),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Inquiry with the responses visible to the caller
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InquiryThreadDto {
    pub inquiry: InquiryDto,
    pub responses: Vec<InquiryResponseDto>,
}

impl From<InquiryThread> for InquiryThreadDto {
    fn from(t: InquiryThread) -> Self {
        Self {
            inquiry: t.inquiry.into(),
            responses: t.responses.into_iter().map(Into::into).collect(),
        }
    }
}
