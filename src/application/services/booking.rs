//! Booking lifecycle engine
//!
//! Creation (direct or inquiry-derived) and the confirm / decline / cancel /
//! complete transitions. Every operation checks authorization and current
//! state, persists with a plain read-then-write, then emits a notice to
//! the outbox. Notices never block or roll back the transition.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::booking::{
    Booking, BookingDraft, BookingFilter, BookingStatus, DEFAULT_CURRENCY,
};
use crate::domain::catalog::EntityType;
use crate::domain::{DomainError, DomainResult, ErrorCode, RepositoryProvider};
use crate::notifications::{Notice, Notifier};
use crate::shared::{PaginatedResult, PaginationParams};

use super::availability::AvailabilityChecker;
use super::entity_lookup::EntityLookup;

/// Customer-initiated booking request
#[derive(Debug, Clone)]
pub struct DirectBookingRequest {
    pub entity_type: EntityType,
    pub entity_id: String,
    pub date: Option<NaiveDate>,
    pub guests: i32,
    pub notes: Option<String>,
    pub contact_phone: Option<String>,
}

/// Input for the internal path that starts at `CONFIRMED`
#[derive(Debug, Clone)]
pub struct NewBooking {
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
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    lookup: EntityLookup,
    availability: AvailabilityChecker,
    notifier: Notifier,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, notifier: Notifier) -> Self {
        Self {
            lookup: EntityLookup::new(repos.clone()),
            availability: AvailabilityChecker::new(repos.clone()),
            repos,
            notifier,
        }
    }

    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    pub fn lookup(&self) -> &EntityLookup {
        &self.lookup
    }

    /// Customer booking request; starts `PENDING` until the provider answers.
    pub async fn create_direct_booking(
        &self,
        customer_id: &str,
        request: DirectBookingRequest,
    ) -> DomainResult<Booking> {
        if request.guests < 1 {
            return Err(DomainError::bad_request(
                ErrorCode::InvalidGuests,
                "At least one guest is required",
            ));
        }

        let entity_type = request.entity_type;
        let entity = self
            .lookup
            .lookup(entity_type, &request.entity_id)
            .await?
            .ok_or_else(|| DomainError::not_found(entity_type.label(), &request.entity_id))?;

        if !entity.is_active {
            return Err(DomainError::bad_request(
                ErrorCode::EntityInactive,
                format!("This {} is not currently available", entity_type.label().to_lowercase()),
            ));
        }

        if entity.owner_id == customer_id {
            return Err(DomainError::bad_request(
                ErrorCode::SelfBooking,
                "You cannot book your own listing",
            ));
        }

        let (total_price, currency) = match entity_type {
            EntityType::Tour => {
                match request.date {
                    Some(date) => {
                        let check = self
                            .availability
                            .check_tour_availability(&request.entity_id, date, request.guests)
                            .await?;
                        if !check.available {
                            return Err(DomainError::bad_request(
                                ErrorCode::InsufficientAvailability,
                                check
                                    .reason
                                    .unwrap_or_else(|| "Not enough availability".to_string()),
                            ));
                        }
                    }
                    None => {
                        self.availability
                            .require_dateless_allowed(&request.entity_id)
                            .await?
                    }
                }
                (
                    entity.price * Decimal::from(request.guests),
                    currency_or_default(&entity.currency),
                )
            }
            EntityType::Guide | EntityType::Driver => {
                (Decimal::ZERO, currency_or_default(&entity.currency))
            }
        };

        let snapshot = self
            .lookup
            .lookup_info(entity_type, &request.entity_id)
            .await?;

        let booking = Booking::new(
            BookingDraft {
                user_id: customer_id.to_string(),
                entity_type,
                entity_id: request.entity_id,
                date: request.date,
                guests: request.guests,
                total_price,
                currency,
                notes: request.notes,
                contact_phone: request.contact_phone,
                inquiry_id: None,
                snapshot,
            },
            BookingStatus::Pending,
        );
        self.repos.bookings().save(booking.clone()).await?;

        info!(
            booking_id = %booking.id,
            reference = %booking.reference_number,
            customer_id,
            entity_type = %booking.entity_type,
            entity_id = %booking.entity_id,
            guests = booking.guests,
            "Booking request created"
        );
        metrics::counter!(
            "bookings_created_total",
            "entity_type" => booking.entity_type.as_str(),
            "path" => "direct"
        )
        .increment(1);

        self.notifier.emit(Notice::BookingRequested(booking.clone()));
        Ok(booking)
    }

    /// Internal creation path used when acceptance already happened
    /// elsewhere (accepted inquiries). Starts at `CONFIRMED`.
    pub async fn create_booking(&self, input: NewBooking) -> DomainResult<Booking> {
        if self
            .lookup
            .lookup(input.entity_type, &input.entity_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(
                input.entity_type.label(),
                input.entity_id,
            ));
        }

        let snapshot = self
            .lookup
            .lookup_info(input.entity_type, &input.entity_id)
            .await?;

        let booking = Booking::new(
            BookingDraft {
                user_id: input.user_id,
                entity_type: input.entity_type,
                entity_id: input.entity_id,
                date: input.date,
                guests: input.guests.max(1),
                total_price: input.total_price,
                currency: currency_or_default(&input.currency),
                notes: input.notes,
                contact_phone: input.contact_phone,
                inquiry_id: input.inquiry_id,
                snapshot,
            },
            BookingStatus::Confirmed,
        );
        self.repos.bookings().save(booking.clone()).await?;

        info!(
            booking_id = %booking.id,
            reference = %booking.reference_number,
            inquiry_id = ?booking.inquiry_id,
            entity_type = %booking.entity_type,
            "Booking created"
        );
        metrics::counter!(
            "bookings_created_total",
            "entity_type" => booking.entity_type.as_str(),
            "path" => "internal"
        )
        .increment(1);

        Ok(booking)
    }

    pub async fn get_booking_by_id(
        &self,
        booking_id: &str,
        requester_id: &str,
    ) -> DomainResult<Booking> {
        let booking = self.load(booking_id).await?;

        if booking.user_id == requester_id
            || booking.provider_user_id.as_deref() == Some(requester_id)
        {
            return Ok(booking);
        }

        // Legacy rows without a recorded provider: ask the entity.
        if booking.provider_user_id.is_none() && self.owns_entity(&booking, requester_id).await? {
            return Ok(booking);
        }

        Err(forbidden())
    }

    pub async fn get_user_bookings(
        &self,
        user_id: &str,
        page: PaginationParams,
        filter: BookingFilter,
    ) -> DomainResult<PaginatedResult<Booking>> {
        self.repos.bookings().find_by_user(user_id, &filter, page).await
    }

    pub async fn get_received_bookings(
        &self,
        provider_user_id: &str,
        page: PaginationParams,
        filter: BookingFilter,
    ) -> DomainResult<PaginatedResult<Booking>> {
        self.repos
            .bookings()
            .find_received_by_provider(provider_user_id, &filter, page)
            .await
    }

    pub async fn confirm_booking(
        &self,
        booking_id: &str,
        provider_id: &str,
        provider_notes: Option<String>,
    ) -> DomainResult<Booking> {
        let mut booking = self.load(booking_id).await?;
        self.require_provider(&booking, provider_id).await?;

        booking.confirm(provider_notes)?;
        self.store_transition(&booking, provider_id).await?;

        self.notifier.emit(Notice::BookingConfirmed(booking.clone()));
        Ok(booking)
    }

    pub async fn decline_booking(
        &self,
        booking_id: &str,
        provider_id: &str,
        declined_reason: String,
    ) -> DomainResult<Booking> {
        let mut booking = self.load(booking_id).await?;
        self.require_provider(&booking, provider_id).await?;

        booking.decline(declined_reason)?;
        self.store_transition(&booking, provider_id).await?;

        self.notifier.emit(Notice::BookingDeclined(booking.clone()));
        Ok(booking)
    }

    /// Only the customer may cancel; providers decline instead.
    pub async fn cancel_booking(
        &self,
        booking_id: &str,
        requester_id: &str,
    ) -> DomainResult<Booking> {
        let mut booking = self.load(booking_id).await?;
        if booking.user_id != requester_id {
            return Err(forbidden());
        }

        booking.cancel(Utc::now())?;
        self.store_transition(&booking, requester_id).await?;

        self.notifier.emit(Notice::BookingCancelled(booking.clone()));
        Ok(booking)
    }

    pub async fn complete_booking(
        &self,
        booking_id: &str,
        provider_id: &str,
    ) -> DomainResult<Booking> {
        let mut booking = self.load(booking_id).await?;
        self.require_provider(&booking, provider_id).await?;

        booking.complete()?;
        self.store_transition(&booking, provider_id).await?;

        self.notifier.emit(Notice::BookingCompleted(booking.clone()));
        Ok(booking)
    }

    async fn load(&self, booking_id: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))
    }

    async fn store_transition(&self, booking: &Booking, actor_id: &str) -> DomainResult<()> {
        self.repos.bookings().update(booking.clone()).await?;
        info!(
            booking_id = %booking.id,
            status = %booking.status,
            actor_id,
            "Booking status changed"
        );
        metrics::counter!("booking_transitions_total", "status" => booking.status.as_str())
            .increment(1);
        Ok(())
    }

    /// Provider actions require owning the booked entity today. If the
    /// entity is gone, the provider recorded on the booking still counts.
    async fn require_provider(&self, booking: &Booking, provider_id: &str) -> DomainResult<()> {
        match self.lookup.lookup(booking.entity_type, &booking.entity_id).await? {
            Some(entity) if entity.owner_id == provider_id => Ok(()),
            None if booking.provider_user_id.as_deref() == Some(provider_id) => Ok(()),
            _ => Err(forbidden()),
        }
    }

    async fn owns_entity(&self, booking: &Booking, user_id: &str) -> DomainResult<bool> {
        Ok(self
            .lookup
            .lookup(booking.entity_type, &booking.entity_id)
            .await?
            .is_some_and(|e| e.owner_id == user_id))
    }
}

fn forbidden() -> DomainError {
    DomainError::Forbidden("You do not have access to this booking".to_string())
}

fn currency_or_default(currency: &str) -> String {
    if currency.trim().is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        currency.to_string()
    }
}
