//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::{from_minor, to_minor};
use crate::domain::booking::{Booking, BookingFilter, BookingRepository, BookingStatus};
use crate::domain::catalog::EntityType;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::bookings;
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn page(
        &self,
        query: Select<bookings::Entity>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>> {
        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_desc(bookings::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await?;

        let items = models
            .into_iter()
            .map(model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(PaginatedResult::new(items, total, page))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: bookings::Model) -> DomainResult<Booking> {
    let entity_type = EntityType::parse(&m.entity_type).ok_or_else(|| {
        DomainError::Storage(format!("Booking {} has unknown entity type {}", m.id, m.entity_type))
    })?;
    let status = BookingStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!("Booking {} has unknown status {}", m.id, m.status))
    })?;

    Ok(Booking {
        id: m.id,
        reference_number: m.reference_number,
        user_id: m.user_id,
        entity_type,
        entity_id: m.entity_id,
        provider_user_id: m.provider_user_id,
        inquiry_id: m.inquiry_id,
        entity_name: m.entity_name,
        entity_image: m.entity_image,
        provider_name: m.provider_name,
        date: m.date,
        guests: m.guests,
        total_price: from_minor(m.total_price),
        currency: m.currency,
        notes: m.notes,
        contact_phone: m.contact_phone,
        provider_notes: m.provider_notes,
        declined_reason: m.declined_reason,
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
        cancelled_at: m.cancelled_at,
    })
}

fn domain_to_active(b: Booking) -> DomainResult<bookings::ActiveModel> {
    let total_price = to_minor(b.total_price)?;
    Ok(bookings::ActiveModel {
        id: Set(b.id),
        reference_number: Set(b.reference_number),
        user_id: Set(b.user_id),
        entity_type: Set(b.entity_type.as_str().to_string()),
        entity_id: Set(b.entity_id),
        provider_user_id: Set(b.provider_user_id),
        inquiry_id: Set(b.inquiry_id),
        entity_name: Set(b.entity_name),
        entity_image: Set(b.entity_image),
        provider_name: Set(b.provider_name),
        date: Set(b.date),
        guests: Set(b.guests),
        total_price: Set(total_price),
        currency: Set(b.currency),
        notes: Set(b.notes),
        contact_phone: Set(b.contact_phone),
        provider_notes: Set(b.provider_notes),
        declined_reason: Set(b.declined_reason),
        status: Set(b.status.as_str().to_string()),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
        cancelled_at: Set(b.cancelled_at),
    })
}

fn filter_condition(filter: &BookingFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(status) = filter.status {
        cond = cond.add(bookings::Column::Status.eq(status.as_str()));
    }
    if let Some(entity_type) = filter.entity_type {
        cond = cond.add(bookings::Column::EntityType.eq(entity_type.as_str()));
    }
    cond
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn save(&self, b: Booking) -> DomainResult<()> {
        debug!("Saving booking: {} ({})", b.id, b.reference_number);
        domain_to_active(b)?.insert(&self.db).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        bookings::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        debug!("Updating booking: {} -> {}", b.id, b.status);

        let existing = bookings::Entity::find_by_id(b.id.clone())
            .one(&self.db)
            .await?;
        if existing.is_none() {
            return Err(DomainError::not_found("Booking", b.id));
        }

        domain_to_active(b)?.update(&self.db).await?;
        Ok(())
    }

    async fn count_booked_guests(&self, tour_id: &str, date: NaiveDate) -> DomainResult<i64> {
        let holding = BookingStatus::CAPACITY_HOLDING.iter().map(|s| s.as_str());
        let guests: Vec<i32> = bookings::Entity::find()
            .select_only()
            .column(bookings::Column::Guests)
            .filter(bookings::Column::EntityType.eq(EntityType::Tour.as_str()))
            .filter(bookings::Column::EntityId.eq(tour_id))
            .filter(bookings::Column::Date.eq(date))
            .filter(bookings::Column::Status.is_in(holding))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(guests.into_iter().map(i64::from).sum())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        filter: &BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>> {
        let query = bookings::Entity::find()
            .filter(bookings::Column::UserId.eq(user_id))
            .filter(filter_condition(filter));
        self.page(query, page).await
    }

    async fn find_received_by_provider(
        &self,
        provider_user_id: &str,
        filter: &BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>> {
        let query = bookings::Entity::find()
            .filter(bookings::Column::ProviderUserId.eq(provider_user_id))
            .filter(filter_condition(filter));
        self.page(query, page).await
    }
}
