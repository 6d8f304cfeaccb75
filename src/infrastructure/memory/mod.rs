//! In-memory repositories for development and testing
//!
//! One `InMemoryRepositoryProvider` implements every repository trait over
//! `DashMap`s. The seed helpers build valid catalog rows with sensible
//! defaults that callers tweak and write back with the `put_*` methods.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::domain::booking::{Booking, BookingFilter, BookingRepository, DEFAULT_CURRENCY};
use crate::domain::catalog::{
    AvailabilityType, CatalogRepository, Company, Driver, EntityType, Guide, Tour,
};
use crate::domain::inquiry::{Inquiry, InquiryRepository, InquiryResponse, InquiryResponseStatus};
use crate::domain::provider::{
    ProviderKind, ProviderProfile, ProviderStatsRepository, ResponseStats,
};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{PaginatedResult, PaginationParams};

#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    users: DashMap<String, User>,
    tours: DashMap<String, Tour>,
    guides: DashMap<String, Guide>,
    drivers: DashMap<String, Driver>,
    companies: DashMap<String, Company>,
    bookings: DashMap<String, Booking>,
    inquiries: DashMap<String, Inquiry>,
    /// Keyed by `(inquiry_id, recipient_id)`
    responses: DashMap<(String, String), InquiryResponse>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Seeding ────────────────────────────────────────────────

    pub fn put_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn seed_user(&self, id: &str, name: &str) -> User {
        let user = User::new(id, name, format!("{}@example.com", id));
        self.put_user(user.clone());
        user
    }

    pub fn put_tour(&self, tour: Tour) {
        self.tours.insert(tour.id.clone(), tour);
    }

    /// Active daily tour, 100 GEL per guest, unlimited capacity.
    pub fn seed_tour(&self, id: &str, owner_id: &str) -> Tour {
        let tour = Tour {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            title: format!("Tour {}", id),
            image: None,
            is_active: true,
            price: Decimal::new(100, 0),
            currency: DEFAULT_CURRENCY.to_string(),
            availability_type: AvailabilityType::Daily,
            available_dates: None,
            max_people: None,
        };
        self.put_tour(tour.clone());
        tour
    }

    pub fn put_guide(&self, guide: Guide) {
        self.guides.insert(guide.id.clone(), guide);
    }

    pub fn seed_guide(&self, id: &str, user_id: &str) -> Guide {
        let guide = Guide {
            id: id.to_string(),
            user_id: user_id.to_string(),
            photo: None,
            is_available: true,
            price_per_day: Some(Decimal::new(150, 0)),
            currency: DEFAULT_CURRENCY.to_string(),
            stats: ResponseStats::default(),
        };
        self.put_guide(guide.clone());
        guide
    }

    pub fn put_driver(&self, driver: Driver) {
        self.drivers.insert(driver.id.clone(), driver);
    }

    pub fn seed_driver(&self, id: &str, user_id: &str) -> Driver {
        let driver = Driver {
            id: id.to_string(),
            user_id: user_id.to_string(),
            photo: None,
            is_available: true,
            stats: ResponseStats::default(),
        };
        self.put_driver(driver.clone());
        driver
    }

    pub fn put_company(&self, company: Company) {
        self.companies.insert(company.id.clone(), company);
    }

    pub fn seed_company(&self, id: &str, user_id: &str) -> Company {
        let company = Company {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: format!("Company {}", id),
            logo: None,
            stats: ResponseStats::default(),
        };
        self.put_company(company.clone());
        company
    }

    pub fn remove_tour(&self, id: &str) {
        self.tours.remove(id);
    }

    pub fn remove_guide(&self, id: &str) {
        self.guides.remove(id);
    }

    // ── Inspection ─────────────────────────────────────────────

    pub fn guide(&self, id: &str) -> Option<Guide> {
        self.guides.get(id).map(|g| g.value().clone())
    }

    pub fn driver(&self, id: &str) -> Option<Driver> {
        self.drivers.get(id).map(|d| d.value().clone())
    }

    pub fn company(&self, id: &str) -> Option<Company> {
        self.companies.get(id).map(|c| c.value().clone())
    }

    /// All bookings, in no particular order
    pub fn all_bookings(&self) -> Vec<Booking> {
        self.bookings.iter().map(|b| b.value().clone()).collect()
    }

    /// Overwrite a stored booking as-is, e.g. to simulate legacy rows.
    pub fn put_booking(&self, booking: Booking) {
        self.bookings.insert(booking.id.clone(), booking);
    }

    fn paginate(
        &self,
        keep: impl Fn(&Booking) -> bool,
        page: PaginationParams,
    ) -> PaginatedResult<Booking> {
        let mut matching: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| keep(b.value()))
            .map(|b| b.value().clone())
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        PaginatedResult::new(items, total, page)
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn catalog(&self) -> &dyn CatalogRepository {
        self
    }

    fn inquiries(&self) -> &dyn InquiryRepository {
        self
    }

    fn provider_stats(&self) -> &dyn ProviderStatsRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepositoryProvider {
    async fn save(&self, booking: Booking) -> DomainResult<()> {
        if self.bookings.contains_key(&booking.id) {
            return Err(DomainError::Storage(format!(
                "Booking {} already exists",
                booking.id
            )));
        }
        self.bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|b| b.value().clone()))
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        match self.bookings.get_mut(&booking.id) {
            Some(mut existing) => {
                *existing = booking;
                Ok(())
            }
            None => Err(DomainError::not_found("Booking", booking.id)),
        }
    }

    async fn count_booked_guests(&self, tour_id: &str, date: NaiveDate) -> DomainResult<i64> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| {
                b.entity_type == EntityType::Tour
                    && b.entity_id == tour_id
                    && b.date == Some(date)
                    && b.status.holds_capacity()
            })
            .map(|b| i64::from(b.guests))
            .sum())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        filter: &BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>> {
        Ok(self.paginate(|b| b.user_id == user_id && filter.matches(b), page))
    }

    async fn find_received_by_provider(
        &self,
        provider_user_id: &str,
        filter: &BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>> {
        Ok(self.paginate(
            |b| b.provider_user_id.as_deref() == Some(provider_user_id) && filter.matches(b),
            page,
        ))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepositoryProvider {
    async fn find_tour(&self, id: &str) -> DomainResult<Option<Tour>> {
        Ok(self.tours.get(id).map(|t| t.value().clone()))
    }

    async fn find_guide(&self, id: &str) -> DomainResult<Option<Guide>> {
        Ok(self.guide(id))
    }

    async fn find_driver(&self, id: &str) -> DomainResult<Option<Driver>> {
        Ok(self.driver(id))
    }

    async fn find_company(&self, id: &str) -> DomainResult<Option<Company>> {
        Ok(self.company(id))
    }
}

#[async_trait]
impl InquiryRepository for InMemoryRepositoryProvider {
    async fn save(&self, inquiry: Inquiry, responses: Vec<InquiryResponse>) -> DomainResult<()> {
        for response in responses {
            self.responses.insert(
                (response.inquiry_id.clone(), response.recipient_id.clone()),
                response,
            );
        }
        self.inquiries.insert(inquiry.id.clone(), inquiry);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Inquiry>> {
        Ok(self.inquiries.get(id).map(|i| i.value().clone()))
    }

    async fn find_response(
        &self,
        inquiry_id: &str,
        recipient_id: &str,
    ) -> DomainResult<Option<InquiryResponse>> {
        Ok(self
            .responses
            .get(&(inquiry_id.to_string(), recipient_id.to_string()))
            .map(|r| r.value().clone()))
    }

    async fn find_responses(&self, inquiry_id: &str) -> DomainResult<Vec<InquiryResponse>> {
        let mut found: Vec<InquiryResponse> = self
            .responses
            .iter()
            .filter(|r| r.inquiry_id == inquiry_id)
            .map(|r| r.value().clone())
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    async fn update_response(&self, response: InquiryResponse) -> DomainResult<()> {
        let key = (response.inquiry_id.clone(), response.recipient_id.clone());
        match self.responses.get_mut(&key) {
            Some(mut existing) => {
                *existing = response;
                Ok(())
            }
            None => Err(DomainError::not_found("InquiryResponse", response.id)),
        }
    }

    async fn find_stale_pending(
        &self,
        created_before: DateTime<Utc>,
    ) -> DomainResult<Vec<InquiryResponse>> {
        Ok(self
            .responses
            .iter()
            .filter(|r| r.status == InquiryResponseStatus::Pending && r.created_at < created_before)
            .map(|r| r.value().clone())
            .collect())
    }
}

#[async_trait]
impl ProviderStatsRepository for InMemoryRepositoryProvider {
    async fn find_profile(
        &self,
        kind: ProviderKind,
        user_id: &str,
    ) -> DomainResult<Option<ProviderProfile>> {
        let found = match kind {
            ProviderKind::Guide => self
                .guides
                .iter()
                .find(|g| g.user_id == user_id)
                .map(|g| (g.id.clone(), g.stats)),
            ProviderKind::Driver => self
                .drivers
                .iter()
                .find(|d| d.user_id == user_id)
                .map(|d| (d.id.clone(), d.stats)),
            ProviderKind::Company => self
                .companies
                .iter()
                .find(|c| c.user_id == user_id)
                .map(|c| (c.id.clone(), c.stats)),
        };
        Ok(found.map(|(profile_id, stats)| ProviderProfile {
            kind,
            profile_id,
            user_id: user_id.to_string(),
            stats,
        }))
    }

    async fn update_stats(
        &self,
        kind: ProviderKind,
        profile_id: &str,
        stats: ResponseStats,
    ) -> DomainResult<()> {
        let updated = match kind {
            ProviderKind::Guide => self.guides.get_mut(profile_id).map(|mut g| g.stats = stats),
            ProviderKind::Driver => self.drivers.get_mut(profile_id).map(|mut d| d.stats = stats),
            ProviderKind::Company => self
                .companies
                .get_mut(profile_id)
                .map(|mut c| c.stats = stats),
        };
        updated.ok_or_else(|| DomainError::not_found("Profile", profile_id))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }
}
