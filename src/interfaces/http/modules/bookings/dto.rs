//! Booking DTOs

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Booking;

/// Customer booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// TOUR, GUIDE or DRIVER
    #[schema(example = "TOUR")]
    pub entity_type: String,
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub entity_id: String,
    /// `YYYY-MM-DD`; may be omitted for by-request tours
    #[schema(example = "2026-05-01")]
    pub date: Option<String>,
    pub guests: i32,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub contact_phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ConfirmBookingRequest {
    /// Shown to the customer in the confirmation
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub provider_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeclineBookingRequest {
    #[validate(length(min = 1, max = 2000, message = "must be 1-2000 characters"))]
    pub declined_reason: String,
}

/// Filters and paging for booking lists
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// PENDING, CONFIRMED, COMPLETED, CANCELLED or DECLINED
    pub status: Option<String>,
    /// TOUR, GUIDE or DRIVER
    pub entity_type: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

/// Booking in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: String,
    #[schema(example = "BK-20260501-A7K2QZ")]
    pub reference_number: String,
    pub user_id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub provider_user_id: Option<String>,
    pub inquiry_id: Option<String>,
    pub entity_name: String,
    pub entity_image: Option<String>,
    pub provider_name: Option<String>,
    pub date: Option<String>,
    pub guests: i32,
    pub total_price: f64,
    pub currency: String,
    pub notes: Option<String>,
    pub contact_phone: Option<String>,
    pub provider_notes: Option<String>,
    pub declined_reason: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub cancelled_at: Option<String>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            reference_number: b.reference_number,
            user_id: b.user_id,
            entity_type: b.entity_type.as_str().to_string(),
            entity_id: b.entity_id,
            provider_user_id: b.provider_user_id,
            inquiry_id: b.inquiry_id,
            entity_name: b.entity_name,
            entity_image: b.entity_image,
            provider_name: b.provider_name,
            date: b.date.map(|d| d.format("%Y-%m-%d").to_string()),
            guests: b.guests,
            total_price: b.total_price.to_f64().unwrap_or_default(),
            currency: b.currency,
            notes: b.notes,
            contact_phone: b.contact_phone,
            provider_notes: b.provider_notes,
            declined_reason: b.declined_reason,
            status: b.status.as_str().to_string(),
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
            cancelled_at: b.cancelled_at.map(|t| t.to_rfc3339()),
        }
    }
}
