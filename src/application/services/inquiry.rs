//! Inquiries: creation, recipient responses and conversion to bookings
//!
//! Recording a response is the primary effect. Response-time statistics,
//! auto-created bookings and notifications follow it and cannot undo it.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::booking::Booking;
use crate::domain::catalog::EntityType;
use crate::domain::inquiry::{
    Inquiry, InquiryResponse, InquiryResponseStatus, InquiryTargetType,
};
use crate::domain::{DomainError, DomainResult, ErrorCode, RepositoryProvider};
use crate::notifications::{Notice, Notifier};

use super::booking::{BookingService, NewBooking};
use super::entity_lookup::EntityLookup;
use super::response_time::ResponseTimeTracker;

#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub target_type: InquiryTargetType,
    pub target_ids: Vec<String>,
    pub subject: String,
    pub message: String,
    pub requested_date: Option<NaiveDate>,
    pub guests: Option<i32>,
}

/// An inquiry with one response per recipient
#[derive(Debug, Clone)]
pub struct InquiryThread {
    pub inquiry: Inquiry,
    pub responses: Vec<InquiryResponse>,
}

pub struct InquiryService {
    repos: Arc<dyn RepositoryProvider>,
    bookings: Arc<BookingService>,
    lookup: EntityLookup,
    tracker: ResponseTimeTracker,
    notifier: Notifier,
}

impl InquiryService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        bookings: Arc<BookingService>,
        notifier: Notifier,
    ) -> Self {
        Self {
            lookup: EntityLookup::new(repos.clone()),
            tracker: ResponseTimeTracker::new(repos.clone()),
            repos,
            bookings,
            notifier,
        }
    }

    pub async fn create_inquiry(
        &self,
        customer_id: &str,
        input: NewInquiry,
    ) -> DomainResult<InquiryThread> {
        let mut seen = HashSet::new();
        let target_ids: Vec<String> = input
            .target_ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect();

        if target_ids.is_empty() {
            return Err(DomainError::bad_request(
                ErrorCode::InvalidInquiry,
                "An inquiry needs at least one recipient",
            ));
        }
        if input.guests.is_some_and(|g| g < 1) {
            return Err(DomainError::bad_request(
                ErrorCode::InvalidGuests,
                "At least one guest is required",
            ));
        }

        let mut recipients: Vec<String> = Vec::new();
        for target_id in &target_ids {
            let owner = self.target_owner(input.target_type, target_id).await?;
            if owner == customer_id {
                return Err(DomainError::bad_request(
                    ErrorCode::InvalidInquiry,
                    "You cannot send an inquiry to yourself",
                ));
            }
            if !recipients.contains(&owner) {
                recipients.push(owner);
            }
        }

        let now = Utc::now();
        let inquiry = Inquiry {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: customer_id.to_string(),
            target_type: input.target_type,
            target_ids,
            subject: input.subject,
            message: input.message,
            requested_date: input.requested_date,
            guests: input.guests,
            created_at: now,
        };
        let responses: Vec<InquiryResponse> = recipients
            .iter()
            .map(|r| InquiryResponse::pending(&inquiry.id, r, now))
            .collect();

        self.repos
            .inquiries()
            .save(inquiry.clone(), responses.clone())
            .await?;

        info!(
            inquiry_id = %inquiry.id,
            customer_id,
            target_type = %inquiry.target_type,
            recipients = responses.len(),
            "Inquiry created"
        );
        Ok(InquiryThread { inquiry, responses })
    }

    pub async fn get_inquiry(&self, inquiry_id: &str, requester_id: &str) -> DomainResult<InquiryThread> {
        let inquiry = self.load(inquiry_id).await?;
        let responses = self.repos.inquiries().find_responses(inquiry_id).await?;

        if inquiry.user_id == requester_id {
            return Ok(InquiryThread { inquiry, responses });
        }
        // Recipients only see their own response.
        let own: Vec<InquiryResponse> = responses
            .into_iter()
            .filter(|r| r.recipient_id == requester_id)
            .collect();
        if own.is_empty() {
            return Err(DomainError::Forbidden(
                "You do not have access to this inquiry".to_string(),
            ));
        }
        Ok(InquiryThread { inquiry, responses: own })
    }

    pub async fn respond_to_inquiry(
        &self,
        inquiry_id: &str,
        responder_id: &str,
        status: InquiryResponseStatus,
        message: Option<String>,
    ) -> DomainResult<InquiryResponse> {
        let inquiry = self.load(inquiry_id).await?;
        let mut response = self
            .repos
            .inquiries()
            .find_response(inquiry_id, responder_id)
            .await?
            .ok_or_else(|| {
                DomainError::Forbidden("You are not a recipient of this inquiry".to_string())
            })?;

        let responded_at = Utc::now();
        let first_response = response.respond(status, message, responded_at)?;
        self.repos.inquiries().update_response(response.clone()).await?;

        info!(
            inquiry_id,
            responder_id,
            status = %response.status,
            first_response,
            "Inquiry response recorded"
        );
        metrics::counter!("inquiry_responses_total", "status" => response.status.as_str())
            .increment(1);

        if first_response {
            if let Err(e) = self
                .tracker
                .record_response(responder_id, inquiry.created_at, responded_at)
                .await
            {
                warn!(inquiry_id, responder_id, error = %e, "Failed to update response time");
            }
        }

        if response.status == InquiryResponseStatus::Accepted {
            if let Err(e) = self.convert_to_bookings(&inquiry, responder_id).await {
                warn!(inquiry_id, error = %e, "Failed to create bookings from inquiry");
            }
        }

        self.notifier.emit(Notice::InquiryAnswered {
            inquiry,
            response: response.clone(),
        });
        Ok(response)
    }

    /// Create a `CONFIRMED` booking for every target of an accepted
    /// inquiry that `responder_id` owns. Company inquiries produce nothing.
    pub async fn convert_to_bookings(
        &self,
        inquiry: &Inquiry,
        responder_id: &str,
    ) -> DomainResult<Vec<Booking>> {
        let Some(entity_type) = inquiry.target_type.booking_entity_type() else {
            debug!(inquiry_id = %inquiry.id, "Company inquiry accepted, no booking created");
            return Ok(Vec::new());
        };

        let guests = inquiry.guests.unwrap_or(1).max(1);
        let mut created = Vec::with_capacity(inquiry.target_ids.len());

        for entity_id in &inquiry.target_ids {
            let Some(entity) = self.lookup.lookup(entity_type, entity_id).await? else {
                warn!(
                    inquiry_id = %inquiry.id,
                    entity_id = %entity_id,
                    "Inquiry target no longer exists, skipping booking"
                );
                continue;
            };
            if entity.owner_id != responder_id {
                continue;
            }

            let total_price = if entity_type == EntityType::Tour {
                entity.price * Decimal::from(guests)
            } else {
                Decimal::ZERO
            };
            let currency = entity.currency;

            let booking = self
                .bookings
                .create_booking(NewBooking {
                    user_id: inquiry.user_id.clone(),
                    entity_type,
                    entity_id: entity_id.clone(),
                    date: inquiry.requested_date,
                    guests,
                    total_price,
                    currency,
                    notes: Some(inquiry.message.clone()),
                    contact_phone: None,
                    inquiry_id: Some(inquiry.id.clone()),
                })
                .await?;

            self.notifier
                .emit(Notice::InquiryBookingConfirmed(booking.clone()));
            created.push(booking);
        }

        info!(
            inquiry_id = %inquiry.id,
            bookings = created.len(),
            "Bookings created from accepted inquiry"
        );
        Ok(created)
    }

    async fn load(&self, inquiry_id: &str) -> DomainResult<Inquiry> {
        self.repos
            .inquiries()
            .find_by_id(inquiry_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Inquiry", inquiry_id))
    }

    async fn target_owner(&self, target_type: InquiryTargetType, target_id: &str) -> DomainResult<String> {
        match target_type.booking_entity_type() {
            Some(entity_type) => self
                .lookup
                .lookup(entity_type, target_id)
                .await?
                .map(|e| e.owner_id)
                .ok_or_else(|| DomainError::not_found(entity_type.label(), target_id)),
            None => self
                .repos
                .catalog()
                .find_company(target_id)
                .await?
                .map(|c| c.user_id)
                .ok_or_else(|| DomainError::not_found("Company", target_id)),
        }
    }
}
