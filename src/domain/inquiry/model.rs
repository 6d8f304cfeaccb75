//! Inquiry and per-recipient response entities

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::catalog::EntityType;
use crate::shared::{DomainError, DomainResult, ErrorCode};

/// What an inquiry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InquiryTargetType {
    Tour,
    Guide,
    Driver,
    Company,
}

impl InquiryTargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tour => "TOUR",
            Self::Guide => "GUIDE",
            Self::Driver => "DRIVER",
            Self::Company => "COMPANY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TOUR" => Some(Self::Tour),
            "GUIDE" => Some(Self::Guide),
            "DRIVER" => Some(Self::Driver),
            "COMPANY" => Some(Self::Company),
            _ => None,
        }
    }

    /// Booking entity for an accepted inquiry; companies are not bookable.
    pub fn booking_entity_type(&self) -> Option<EntityType> {
        match self {
            Self::Tour => Some(EntityType::Tour),
            Self::Guide => Some(EntityType::Guide),
            Self::Driver => Some(EntityType::Driver),
            Self::Company => None,
        }
    }
}

impl std::fmt::Display for InquiryTargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InquiryResponseStatus {
    Pending,
    Responded,
    Accepted,
    Declined,
    Expired,
}

impl InquiryResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Responded => "RESPONDED",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
            Self::Expired => "EXPIRED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "RESPONDED" => Some(Self::Responded),
            "ACCEPTED" => Some(Self::Accepted),
            "DECLINED" => Some(Self::Declined),
            "EXPIRED" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Accepted and declined responses never change again.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }
}

impl std::fmt::Display for InquiryResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer's pre-booking question to one or more providers.
#[derive(Debug, Clone, PartialEq)]
pub struct Inquiry {
    pub id: String,
    /// Customer who sent the inquiry
    pub user_id: String,
    pub target_type: InquiryTargetType,
    pub target_ids: Vec<String>,
    pub subject: String,
    pub message: String,
    pub requested_date: Option<NaiveDate>,
    pub guests: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// One recipient's independent reply state.
#[derive(Debug, Clone, PartialEq)]
pub struct InquiryResponse {
    pub id: String,
    pub inquiry_id: String,
    pub recipient_id: String,
    pub status: InquiryResponseStatus,
    pub message: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InquiryResponse {
    pub fn pending(inquiry_id: impl Into<String>, recipient_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            inquiry_id: inquiry_id.into(),
            recipient_id: recipient_id.into(),
            status: InquiryResponseStatus::Pending,
            message: None,
            responded_at: None,
            created_at: at,
        }
    }

    /// Record a reply. Returns `true` when this is the recipient's first
    /// response, which is what the response-time statistic counts.
    /// Answering an `EXPIRED` response counts as the first response.
    pub fn respond(
        &mut self,
        status: InquiryResponseStatus,
        message: Option<String>,
        at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        if self.status.is_final() {
            return Err(DomainError::bad_request(
                ErrorCode::ResponseFinalized,
                format!("This inquiry has already been {}", self.status.as_str().to_lowercase()),
            ));
        }
        if !matches!(
            status,
            InquiryResponseStatus::Responded
                | InquiryResponseStatus::Accepted
                | InquiryResponseStatus::Declined
        ) {
            return Err(DomainError::bad_request(
                ErrorCode::InvalidResponseStatus,
                format!("Cannot respond with status {}", status),
            ));
        }

        let first = self.responded_at.is_none();
        self.status = status;
        if message.is_some() {
            self.message = message;
        }
        if first {
            self.responded_at = Some(at);
        }
        Ok(first)
    }

    pub fn expire(&mut self) {
        if self.status == InquiryResponseStatus::Pending {
            self.status = InquiryResponseStatus::Expired;
        }
    }
}
