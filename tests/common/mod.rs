#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use tour_booking::application::{BookingService, DirectBookingRequest, InquiryService};
use tour_booking::domain::{EntityType, RepositoryProvider};
use tour_booking::notifications::{
    InMemoryEmailSink, InMemoryNotificationSink, Notification,
    NotificationSink, Notifier, NotifierSettings, NotifyError,
};
use tour_booking::InMemoryRepositoryProvider;

pub struct Harness {
    pub store: Arc<InMemoryRepositoryProvider>,
    pub repos: Arc<dyn RepositoryProvider>,
    pub inbox: Arc<InMemoryNotificationSink>,
    pub mail: Arc<InMemoryEmailSink>,
    pub notifier: Notifier,
    pub bookings: Arc<BookingService>,
    pub inquiries: InquiryService,
}

impl Harness {
    pub fn new() -> Self {
        let inbox = Arc::new(InMemoryNotificationSink::new());
        let mail = Arc::new(InMemoryEmailSink::new());
        Self::with_sinks(inbox.clone(), inbox, mail)
    }

    /// Deliver in-app notifications to `sink` while keeping `inbox` for inspection.
    pub fn with_sinks(
        inbox: Arc<InMemoryNotificationSink>,
        sink: Arc<dyn NotificationSink>,
        mail: Arc<InMemoryEmailSink>,
    ) -> Self {
        let store = Arc::new(InMemoryRepositoryProvider::new());
        let repos: Arc<dyn RepositoryProvider> = store.clone();
        let notifier = Notifier::spawn(
            repos.clone(),
            sink,
            mail.clone(),
            NotifierSettings {
                public_url: "https://tours.example.com".to_string(),
                email_enabled: true,
                from_address: "bookings@tours.example.com".to_string(),
            },
        );
        let bookings = Arc::new(BookingService::new(repos.clone(), notifier.clone()));
        let inquiries = InquiryService::new(repos.clone(), bookings.clone(), notifier.clone());

        Self {
            store,
            repos,
            inbox,
            mail,
            notifier,
            bookings,
            inquiries,
        }
    }

    /// Customer `alice`, provider `paul` owning daily tour `t1` (100 GEL).
    pub fn with_tour() -> Self {
        let h = Self::new();
        h.store.seed_user("alice", "Alice");
        h.store.seed_user("paul", "Paul");
        h.store.seed_tour("t1", "paul");
        h
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Wednesday
pub fn wednesday() -> NaiveDate {
    date(2030, 6, 5)
}

/// Saturday
pub fn saturday() -> NaiveDate {
    date(2030, 6, 1)
}

pub fn tour_request(tour_id: &str, day: Option<NaiveDate>, guests: i32) -> DirectBookingRequest {
    DirectBookingRequest {
        entity_type: EntityType::Tour,
        entity_id: tour_id.to_string(),
        date: day,
        guests,
        notes: None,
        contact_phone: None,
    }
}

/// Sink that rejects every delivery.
pub struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("push gateway unavailable".to_string()))
    }
}
