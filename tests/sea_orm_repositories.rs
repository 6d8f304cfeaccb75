use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use tour_booking::application::{BookingService, DirectBookingRequest, InquiryService, NewInquiry};
use tour_booking::domain::booking::{BookingDraft, EntitySnapshot};
use tour_booking::domain::provider::ProviderKind;
use tour_booking::domain::{
    Booking, BookingFilter, BookingStatus, EntityType, Inquiry, InquiryResponse,
    InquiryResponseStatus, InquiryTargetType, RepositoryProvider, ResponseStats,
};
use tour_booking::infrastructure::database::entities::{guides, tours, users};
use tour_booking::notifications::{
    InMemoryEmailSink, InMemoryNotificationSink, Notifier, NotifierSettings,
};
use tour_booking::shared::PaginationParams;
use tour_booking::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

async fn setup() -> (DatabaseConnection, Arc<dyn RepositoryProvider>) {
    let db = init_database(&DatabaseConfig::sqlite_memory()).await.unwrap();
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    (db, repos)
}

async fn insert_user(db: &DatabaseConnection, id: &str, name: &str) {
    users::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        email: Set(format!("{}@example.com", id)),
        email_notifications: Set(true),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();
}

async fn insert_tour(db: &DatabaseConnection, id: &str, owner_id: &str, max_people: Option<i32>) {
    tours::ActiveModel {
        id: Set(id.to_string()),
        owner_id: Set(owner_id.to_string()),
        title: Set("Kazbegi day trip".to_string()),
        image: Set(None),
        is_active: Set(true),
        price: Set(10_050),
        currency: Set("GEL".to_string()),
        availability_type: Set("DAILY".to_string()),
        available_dates: Set(None),
        max_people: Set(max_people),
    }
    .insert(db)
    .await
    .unwrap();
}

async fn insert_guide(db: &DatabaseConnection, id: &str, user_id: &str) {
    guides::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(user_id.to_string()),
        photo: Set(None),
        is_available: Set(true),
        price_per_day: Set(None),
        currency: Set("GEL".to_string()),
        avg_response_time_minutes: Set(None),
        response_count: Set(0),
    }
    .insert(db)
    .await
    .unwrap();
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 5).unwrap()
}

fn booking(user_id: &str, tour_id: &str, guests: i32, status: BookingStatus) -> Booking {
    Booking::new(
        BookingDraft {
            user_id: user_id.to_string(),
            entity_type: EntityType::Tour,
            entity_id: tour_id.to_string(),
            date: Some(day()),
            guests,
            total_price: Decimal::new(40050, 2),
            currency: "GEL".to_string(),
            notes: Some("Window seat".to_string()),
            contact_phone: None,
            inquiry_id: None,
            snapshot: EntitySnapshot {
                entity_name: "Kazbegi day trip".to_string(),
                entity_image: None,
                provider_user_id: Some("paul".to_string()),
                provider_name: Some("Paul".to_string()),
            },
        },
        status,
    )
}

#[tokio::test]
async fn booking_rows_round_trip_and_update() {
    let (_db, repos) = setup().await;

    let b = booking("alice", "t1", 4, BookingStatus::Pending);
    repos.bookings().save(b.clone()).await.unwrap();

    let loaded = repos.bookings().find_by_id(&b.id).await.unwrap().unwrap();
    assert_eq!(loaded.reference_number, b.reference_number);
    assert_eq!(loaded.total_price, Decimal::new(40050, 2));
    assert_eq!(loaded.date, Some(day()));
    assert_eq!(loaded.status, BookingStatus::Pending);
    assert_eq!(loaded.provider_user_id.as_deref(), Some("paul"));

    let mut confirmed = loaded;
    confirmed.confirm(Some("Meet at the hotel".to_string())).unwrap();
    repos.bookings().update(confirmed).await.unwrap();

    let reloaded = repos.bookings().find_by_id(&b.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, BookingStatus::Confirmed);
    assert_eq!(reloaded.provider_notes.as_deref(), Some("Meet at the hotel"));

    assert!(repos.bookings().find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn booked_guests_skip_released_bookings() {
    let (_db, repos) = setup().await;

    for (guests, status) in [
        (2, BookingStatus::Pending),
        (3, BookingStatus::Confirmed),
        (1, BookingStatus::Completed),
        (5, BookingStatus::Cancelled),
        (7, BookingStatus::Declined),
    ] {
        repos.bookings().save(booking("alice", "t1", guests, status)).await.unwrap();
    }
    repos.bookings().save(booking("alice", "t2", 9, BookingStatus::Pending)).await.unwrap();

    assert_eq!(repos.bookings().count_booked_guests("t1", day()).await.unwrap(), 6);
    let other_day = NaiveDate::from_ymd_opt(2030, 6, 6).unwrap();
    assert_eq!(repos.bookings().count_booked_guests("t1", other_day).await.unwrap(), 0);
}

#[tokio::test]
async fn booking_lists_page_and_filter() {
    let (_db, repos) = setup().await;

    for i in 0..5 {
        let status = if i % 2 == 0 { BookingStatus::Pending } else { BookingStatus::Confirmed };
        repos.bookings().save(booking("alice", "t1", 1, status)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    repos.bookings().save(booking("bob", "t1", 1, BookingStatus::Pending)).await.unwrap();

    let page = repos
        .bookings()
        .find_by_user("alice", &BookingFilter::default(), PaginationParams::new(1, 2))
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_pages, 3);
    assert!(page.items[0].created_at >= page.items[1].created_at);

    let pending = BookingFilter {
        status: Some(BookingStatus::Pending),
        entity_type: None,
    };
    let page = repos
        .bookings()
        .find_by_user("alice", &pending, PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(page.total, 3);

    let received = repos
        .bookings()
        .find_received_by_provider("paul", &BookingFilter::default(), PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(received.total, 6);
}

#[tokio::test]
async fn inquiry_is_stored_with_its_responses() {
    let (db, repos) = setup().await;
    insert_user(&db, "alice", "Alice").await;

    let old = Utc::now() - Duration::days(20);
    let inquiry = Inquiry {
        id: "inq-1".to_string(),
        user_id: "alice".to_string(),
        target_type: InquiryTargetType::Guide,
        target_ids: vec!["g1".to_string(), "g2".to_string()],
        subject: "Svaneti".to_string(),
        message: "Four days in July?".to_string(),
        requested_date: Some(day()),
        guests: Some(2),
        created_at: old,
    };
    let responses = vec![
        InquiryResponse::pending("inq-1", "gina", old),
        InquiryResponse::pending("inq-1", "gus", Utc::now()),
    ];
    repos.inquiries().save(inquiry.clone(), responses).await.unwrap();

    let loaded = repos.inquiries().find_by_id("inq-1").await.unwrap().unwrap();
    assert_eq!(loaded.target_ids, inquiry.target_ids);
    assert_eq!(loaded.requested_date, Some(day()));
    assert_eq!(repos.inquiries().find_responses("inq-1").await.unwrap().len(), 2);

    let stale = repos
        .inquiries()
        .find_stale_pending(Utc::now() - Duration::days(14))
        .await
        .unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].recipient_id, "gina");

    let mut reply = repos.inquiries().find_response("inq-1", "gus").await.unwrap().unwrap();
    reply
        .respond(InquiryResponseStatus::Declined, Some("Booked out".to_string()), Utc::now())
        .unwrap();
    repos.inquiries().update_response(reply).await.unwrap();

    let stored = repos.inquiries().find_response("inq-1", "gus").await.unwrap().unwrap();
    assert_eq!(stored.status, InquiryResponseStatus::Declined);
    assert!(stored.responded_at.is_some());
}

#[tokio::test]
async fn provider_stats_are_written_back() {
    let (db, repos) = setup().await;
    insert_user(&db, "gina", "Gina").await;
    insert_guide(&db, "g1", "gina").await;

    let profile = repos
        .provider_stats()
        .find_profile(ProviderKind::Guide, "gina")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.profile_id, "g1");
    assert_eq!(profile.stats, ResponseStats::default());

    let stats = profile.stats.record(30).record(90);
    repos
        .provider_stats()
        .update_stats(ProviderKind::Guide, "g1", stats)
        .await
        .unwrap();

    let guide = repos.catalog().find_guide("g1").await.unwrap().unwrap();
    assert_eq!(guide.stats.avg_response_time_minutes, Some(60));
    assert_eq!(guide.stats.response_count, 2);

    assert!(repos
        .provider_stats()
        .find_profile(ProviderKind::Driver, "gina")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn services_run_against_sqlite() {
    let (db, repos) = setup().await;
    insert_user(&db, "alice", "Alice").await;
    insert_user(&db, "paul", "Paul").await;
    insert_user(&db, "gina", "Gina").await;
    insert_tour(&db, "t1", "paul", Some(5)).await;
    insert_guide(&db, "g1", "gina").await;

    let notifier = Notifier::spawn(
        repos.clone(),
        Arc::new(InMemoryNotificationSink::new()),
        Arc::new(InMemoryEmailSink::new()),
        NotifierSettings::default(),
    );
    let bookings = Arc::new(BookingService::new(repos.clone(), notifier.clone()));
    let inquiries = InquiryService::new(repos.clone(), bookings.clone(), notifier.clone());

    let created = bookings
        .create_direct_booking(
            "alice",
            DirectBookingRequest {
                entity_type: EntityType::Tour,
                entity_id: "t1".to_string(),
                date: Some(day()),
                guests: 4,
                notes: None,
                contact_phone: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.total_price, Decimal::new(40200, 2));

    let err = bookings
        .create_direct_booking(
            "alice",
            DirectBookingRequest {
                entity_type: EntityType::Tour,
                entity_id: "t1".to_string(),
                date: Some(day()),
                guests: 2,
                notes: None,
                contact_phone: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INSUFFICIENT_AVAILABILITY");

    let thread = inquiries
        .create_inquiry(
            "alice",
            NewInquiry {
                target_type: InquiryTargetType::Guide,
                target_ids: vec!["g1".to_string()],
                subject: "Svaneti".to_string(),
                message: "Four days in July?".to_string(),
                requested_date: Some(day()),
                guests: Some(2),
            },
        )
        .await
        .unwrap();
    inquiries
        .respond_to_inquiry(&thread.inquiry.id, "gina", InquiryResponseStatus::Accepted, None)
        .await
        .unwrap();

    let mine = bookings
        .get_user_bookings("alice", PaginationParams::default(), BookingFilter::default())
        .await
        .unwrap();
    assert_eq!(mine.total, 2);
    let from_inquiry = mine
        .items
        .iter()
        .find(|b| b.inquiry_id.as_deref() == Some(thread.inquiry.id.as_str()))
        .unwrap();
    assert_eq!(from_inquiry.status, BookingStatus::Confirmed);
    assert_eq!(from_inquiry.entity_type, EntityType::Guide);

    let guide = repos.catalog().find_guide("g1").await.unwrap().unwrap();
    assert_eq!(guide.stats.response_count, 1);
}
