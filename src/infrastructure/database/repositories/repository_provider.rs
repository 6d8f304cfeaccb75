//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::catalog::CatalogRepository;
use crate::domain::inquiry::InquiryRepository;
use crate::domain::provider::ProviderStatsRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::catalog_repository::SeaOrmCatalogRepository;
use super::inquiry_repository::SeaOrmInquiryRepository;
use super::provider_stats_repository::SeaOrmProviderStatsRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let booking = repos.bookings().find_by_id("b1").await?;
/// let booked = repos.bookings().count_booked_guests("tour-1", date).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    bookings: SeaOrmBookingRepository,
    catalog: SeaOrmCatalogRepository,
    inquiries: SeaOrmInquiryRepository,
    provider_stats: SeaOrmProviderStatsRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            bookings: SeaOrmBookingRepository::new(db.clone()),
            catalog: SeaOrmCatalogRepository::new(db.clone()),
            inquiries: SeaOrmInquiryRepository::new(db.clone()),
            provider_stats: SeaOrmProviderStatsRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn catalog(&self) -> &dyn CatalogRepository {
        &self.catalog
    }

    fn inquiries(&self) -> &dyn InquiryRepository {
        &self.inquiries
    }

    fn provider_stats(&self) -> &dyn ProviderStatsRepository {
        &self.provider_stats
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
