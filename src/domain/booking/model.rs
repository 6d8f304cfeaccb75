//! Booking domain entity and its state machine

use chrono::{DateTime, NaiveDate, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;

use crate::domain::catalog::EntityType;
use crate::shared::{DomainError, DomainResult, ErrorCode};

/// Currency used when an entity does not declare one.
pub const DEFAULT_CURRENCY: &str = "GEL";

/// Booking status
///
/// `Pending -> {Confirmed, Declined}`, `Confirmed -> {Completed, Cancelled}`.
/// A pending request may also be withdrawn (`Cancelled`) by its customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Declined,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Declined => "DECLINED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            "DECLINED" => Some(Self::Declined),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Declined)
    }

    /// Statuses whose guests occupy tour capacity.
    pub fn holds_capacity(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Completed)
    }

    pub const CAPACITY_HOLDING: [BookingStatus; 3] =
        [Self::Pending, Self::Confirmed, Self::Completed];
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display fields copied from the booked entity at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySnapshot {
    pub entity_name: String,
    pub entity_image: Option<String>,
    pub provider_user_id: Option<String>,
    pub provider_name: Option<String>,
}

/// Everything needed to create a booking row.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub user_id: String,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub date: Option<NaiveDate>,
    pub guests: i32,
    pub total_price: Decimal,
    pub currency: String,
    pub notes: Option<String>,
    pub contact_phone: Option<String>,
    pub inquiry_id: Option<String>,
    pub snapshot: EntitySnapshot,
}

/// One reservation of a tour, guide or driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub reference_number: String,
    /// Customer who made the booking
    pub user_id: String,
    pub entity_type: EntityType,
    pub entity_id: String,
    /// Owner of the entity when the booking was made (absent on legacy rows)
    pub provider_user_id: Option<String>,
    pub inquiry_id: Option<String>,
    pub entity_name: String,
    pub entity_image: Option<String>,
    pub provider_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub guests: i32,
    pub total_price: Decimal,
    pub currency: String,
    pub notes: Option<String>,
    pub contact_phone: Option<String>,
    pub provider_notes: Option<String>,
    pub declined_reason: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn new(draft: BookingDraft, status: BookingStatus) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            reference_number: generate_reference_number(now),
            user_id: draft.user_id,
            entity_type: draft.entity_type,
            entity_id: draft.entity_id,
            provider_user_id: draft.snapshot.provider_user_id,
            inquiry_id: draft.inquiry_id,
            entity_name: draft.snapshot.entity_name,
            entity_image: draft.snapshot.entity_image,
            provider_name: draft.snapshot.provider_name,
            date: draft.date,
            guests: draft.guests,
            total_price: draft.total_price,
            currency: draft.currency,
            notes: draft.notes,
            contact_phone: draft.contact_phone,
            provider_notes: None,
            declined_reason: None,
            status,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    pub fn confirm(&mut self, provider_notes: Option<String>) -> DomainResult<()> {
        self.require_pending("confirmed")?;
        self.status = BookingStatus::Confirmed;
        self.provider_notes = provider_notes;
        self.touch();
        Ok(())
    }

    pub fn decline(&mut self, reason: impl Into<String>) -> DomainResult<()> {
        self.require_pending("declined")?;
        self.status = BookingStatus::Declined;
        self.declined_reason = Some(reason.into());
        self.touch();
        Ok(())
    }

    pub fn cancel(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            BookingStatus::Cancelled => Err(DomainError::bad_request(
                ErrorCode::BookingAlreadyCancelled,
                "This booking is already cancelled",
            )),
            BookingStatus::Completed => Err(DomainError::bad_request(
                ErrorCode::BookingCompleted,
                "Completed bookings cannot be cancelled",
            )),
            BookingStatus::Declined => Err(DomainError::bad_request(
                ErrorCode::BookingDeclined,
                "Declined bookings cannot be cancelled",
            )),
            BookingStatus::Pending | BookingStatus::Confirmed => {
                self.status = BookingStatus::Cancelled;
                self.cancelled_at = Some(at);
                self.updated_at = at;
                Ok(())
            }
        }
    }

    pub fn complete(&mut self) -> DomainResult<()> {
        match self.status {
            BookingStatus::Completed => Err(DomainError::bad_request(
                ErrorCode::BookingAlreadyCompleted,
                "This booking is already completed",
            )),
            BookingStatus::Cancelled => Err(DomainError::bad_request(
                ErrorCode::BookingCancelled,
                "Cancelled bookings cannot be completed",
            )),
            BookingStatus::Confirmed => {
                self.status = BookingStatus::Completed;
                self.touch();
                Ok(())
            }
            other => Err(DomainError::bad_request(
                ErrorCode::InvalidBookingStatus,
                format!("Booking cannot be completed in status {}", other),
            )),
        }
    }

    fn require_pending(&self, action: &str) -> DomainResult<()> {
        if self.status != BookingStatus::Pending {
            return Err(DomainError::bad_request(
                ErrorCode::InvalidBookingStatus,
                format!(
                    "Booking cannot be {} in status {}",
                    action, self.status
                ),
            ));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// `BK-YYYYMMDD-XXXXXX` with six random uppercase alphanumerics.
pub fn generate_reference_number(at: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("BK-{}-{}", at.format("%Y%m%d"), suffix)
}

/// Optional list filters for booking queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub entity_type: Option<EntityType>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        self.status.map_or(true, |s| booking.status == s)
            && self.entity_type.map_or(true, |t| booking.entity_type == t)
    }
}

// ── Tests ──────────────────────────────────────────────────────
