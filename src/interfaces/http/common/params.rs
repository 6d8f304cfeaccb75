//! Parsing of path, query and body fields that carry domain values

use chrono::NaiveDate;

use super::ApiError;
use crate::domain::{BookingStatus, EntityType};

/// `YYYY-MM-DD`
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ApiError::unprocessable("INVALID_DATE", format!("{} must be a YYYY-MM-DD date", field))
    })
}

pub fn parse_optional_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_date(field, s).map(Some),
        None => Ok(None),
    }
}

pub fn parse_entity_type(raw: &str) -> Result<EntityType, ApiError> {
    EntityType::parse(raw.trim()).ok_or_else(|| {
        ApiError::unprocessable(
            "INVALID_ENTITY_TYPE",
            format!("Unknown entity type '{}', expected TOUR, GUIDE or DRIVER", raw),
        )
    })
}

pub fn parse_booking_status(raw: &str) -> Result<BookingStatus, ApiError> {
    BookingStatus::parse(raw.trim()).ok_or_else(|| {
        ApiError::unprocessable("INVALID_STATUS", format!("Unknown booking status '{}'", raw))
    })
}
