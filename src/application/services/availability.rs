//! Tour availability: date rules and remaining capacity
//!
//! Read-only against current store state; safe to call repeatedly and
//! concurrently. Two bookings racing for the last spots can both pass.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::catalog::{AvailabilityType, Tour};
use crate::domain::{DomainError, DomainResult, ErrorCode, RepositoryProvider};

/// Reported as remaining capacity for tours without `max_people`.
pub const UNLIMITED_SPOTS: i32 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResult {
    pub available: bool,
    pub remaining_spots: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AvailabilityResult {
    fn available(remaining_spots: i32) -> Self {
        Self {
            available: true,
            remaining_spots,
            reason: None,
        }
    }

    fn unavailable(remaining_spots: i32, reason: impl Into<String>) -> Self {
        Self {
            available: false,
            remaining_spots,
            reason: Some(reason.into()),
        }
    }
}

/// Why `date` fails the tour's rule, or `None` if it passes.
pub fn date_rule_violation(tour: &Tour, date: NaiveDate) -> Option<&'static str> {
    if tour.accepts_date(date) {
        return None;
    }
    Some(match tour.availability_type {
        AvailabilityType::Weekdays => "This tour is only available on weekdays (Monday to Friday)",
        AvailabilityType::Weekends => "This tour is only available on weekends (Saturday and Sunday)",
        _ => "This tour is not available on the selected date",
    })
}

/// Capacity arithmetic once the date rule has passed.
pub fn capacity_check(max_people: Option<i32>, booked_guests: i64, guests: i32) -> AvailabilityResult {
    let Some(max_people) = max_people else {
        return AvailabilityResult::available(UNLIMITED_SPOTS);
    };

    let remaining = (i64::from(max_people) - booked_guests).max(0) as i32;
    if guests > remaining {
        let reason = match remaining {
            0 => "No spots available for this date".to_string(),
            1 => "Only 1 spot remaining for this date".to_string(),
            n => format!("Only {} spots remaining for this date", n),
        };
        return AvailabilityResult::unavailable(remaining, reason);
    }
    AvailabilityResult::available(remaining)
}

#[derive(Clone)]
pub struct AvailabilityChecker {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityChecker {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn check_tour_availability(
        &self,
        tour_id: &str,
        date: NaiveDate,
        guests: i32,
    ) -> DomainResult<AvailabilityResult> {
        let tour = self.load_tour(tour_id).await?;

        if !tour.is_active {
            return Ok(AvailabilityResult::unavailable(0, "Tour is no longer available"));
        }

        if let Some(reason) = date_rule_violation(&tour, date) {
            return Ok(AvailabilityResult::unavailable(0, reason));
        }

        let booked = match tour.max_people {
            Some(_) => self.repos.bookings().count_booked_guests(tour_id, date).await?,
            None => 0,
        };
        Ok(capacity_check(tour.max_people, booked, guests))
    }

    /// Dateless bookings are only allowed for `BY_REQUEST` tours.
    pub async fn require_dateless_allowed(&self, tour_id: &str) -> DomainResult<()> {
        let tour = self.load_tour(tour_id).await?;
        if tour.availability_type != AvailabilityType::ByRequest {
            return Err(DomainError::bad_request(
                ErrorCode::DateRequired,
                "Please choose a date for this tour",
            ));
        }
        Ok(())
    }

    async fn load_tour(&self, tour_id: &str) -> DomainResult<Tour> {
        self.repos
            .catalog()
            .find_tour(tour_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tour", tour_id))
    }
}
