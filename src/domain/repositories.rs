//! Unified access to all per-aggregate repositories

use super::booking::BookingRepository;
use super::catalog::CatalogRepository;
use super::inquiry::InquiryRepository;
use super::provider::ProviderStatsRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let booking = repos.bookings().find_by_id("b1").await?;
///     let tour = repos.catalog().find_tour(&booking.entity_id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;
    fn catalog(&self) -> &dyn CatalogRepository;
    fn inquiries(&self) -> &dyn InquiryRepository;
    fn provider_stats(&self) -> &dyn ProviderStatsRepository;
    fn users(&self) -> &dyn UserRepository;
}
