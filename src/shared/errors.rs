use std::fmt;

use thiserror::Error;

/// Machine-readable codes carried by [`DomainError::BadRequest`].
///
/// Callers branch on these instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidBookingStatus,
    SelfBooking,
    EntityInactive,
    InsufficientAvailability,
    BookingAlreadyCancelled,
    BookingCompleted,
    BookingDeclined,
    BookingAlreadyCompleted,
    BookingCancelled,
    InvalidGuests,
    DateRequired,
    InvalidResponseStatus,
    ResponseFinalized,
    InvalidInquiry,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidBookingStatus => "INVALID_BOOKING_STATUS",
            Self::SelfBooking => "SELF_BOOKING",
            Self::EntityInactive => "ENTITY_INACTIVE",
            Self::InsufficientAvailability => "INSUFFICIENT_AVAILABILITY",
            Self::BookingAlreadyCancelled => "BOOKING_ALREADY_CANCELLED",
            Self::BookingCompleted => "BOOKING_COMPLETED",
            Self::BookingDeclined => "BOOKING_DECLINED",
            Self::BookingAlreadyCompleted => "BOOKING_ALREADY_COMPLETED",
            Self::BookingCancelled => "BOOKING_CANCELLED",
            Self::InvalidGuests => "INVALID_GUESTS",
            Self::DateRequired => "DATE_REQUIRED",
            Self::InvalidResponseStatus => "INVALID_RESPONSE_STATUS",
            Self::ResponseFinalized => "RESPONSE_FINALIZED",
            Self::InvalidInquiry => "INVALID_INQUIRY",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{message}")]
    BadRequest { code: ErrorCode, message: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    /// Stable code for this error, e.g. `BOOKING_NOT_FOUND` or `SELF_BOOKING`.
    pub fn code(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => format!("{}_NOT_FOUND", entity.to_uppercase()),
            Self::Forbidden(_) => "FORBIDDEN".to_string(),
            Self::BadRequest { code, .. } => code.as_str().to_string(),
            Self::Storage(_) => "STORAGE_ERROR".to_string(),
        }
    }

    /// The `BadRequest` code, if this is a business-rule violation.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::BadRequest { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
