//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, BookingFilter};
use crate::shared::{DomainResult, PaginatedResult, PaginationParams};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking
    async fn save(&self, booking: Booking) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// Overwrite an existing booking (read-then-write, no version check)
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Sum of guests over capacity-holding bookings of a tour on `date`
    async fn count_booked_guests(&self, tour_id: &str, date: NaiveDate) -> DomainResult<i64>;

    /// Bookings made by a customer, newest first
    async fn find_by_user(
        &self,
        user_id: &str,
        filter: &BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>>;

    /// Bookings received by a provider, newest first
    async fn find_received_by_provider(
        &self,
        provider_user_id: &str,
        filter: &BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>>;
}
