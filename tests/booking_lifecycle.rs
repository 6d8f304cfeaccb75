mod common;

use std::sync::Arc;

use rust_decimal::Decimal;

use common::{saturday, tour_request, wednesday, FailingSink, Harness};
use tour_booking::application::DirectBookingRequest;
use tour_booking::domain::catalog::AvailabilityType;
use tour_booking::domain::{
    BookingFilter, BookingStatus, DomainError, EntityType, ErrorCode, User,
};
use tour_booking::notifications::{InMemoryEmailSink, InMemoryNotificationSink, NotificationKind};
use tour_booking::shared::PaginationParams;

fn code(err: DomainError) -> Option<ErrorCode> {
    err.error_code()
}

#[tokio::test]
async fn direct_tour_booking_starts_pending_with_total_price() {
    let h = Harness::with_tour();

    let booking = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 4))
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_price, Decimal::new(400, 0));
    assert_eq!(booking.currency, "GEL");
    assert_eq!(booking.provider_user_id.as_deref(), Some("paul"));
    assert_eq!(booking.entity_name, "Tour t1");
    assert_eq!(booking.provider_name.as_deref(), Some("Paul"));
    assert!(booking.reference_number.starts_with("BK-"));

    h.notifier.flush().await;
    let provider_inbox = h.inbox.for_user("paul");
    assert_eq!(provider_inbox.len(), 1);
    assert_eq!(provider_inbox[0].kind, NotificationKind::BookingRequest);
    assert_eq!(provider_inbox[0].booking_id.as_deref(), Some(booking.id.as_str()));
}

#[tokio::test]
async fn provider_confirms_with_notes_and_customer_is_told() {
    let h = Harness::with_tour();
    let booking = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 4))
        .await
        .unwrap();

    let confirmed = h
        .bookings
        .confirm_booking(&booking.id, "paul", Some("Bring warm clothes".to_string()))
        .await
        .unwrap();

    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.provider_notes.as_deref(), Some("Bring warm clothes"));

    let stored = h.bookings.get_booking_by_id(&booking.id, "alice").await.unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);

    h.notifier.flush().await;
    let customer_inbox = h.inbox.for_user("alice");
    assert_eq!(customer_inbox.len(), 1);
    assert_eq!(customer_inbox[0].kind, NotificationKind::BookingConfirmed);
    assert!(customer_inbox[0].message.contains("Bring warm clothes"));
    assert_eq!(h.mail.sent_to("alice@example.com").len(), 1);
}

#[tokio::test]
async fn guide_booking_is_unpriced_and_named_after_owner() {
    let h = Harness::new();
    h.store.seed_user("alice", "Alice");
    h.store.seed_user("gina", "Gina Beridze");
    h.store.seed_guide("g1", "gina");

    let booking = h
        .bookings
        .create_direct_booking(
            "alice",
            DirectBookingRequest {
                entity_type: EntityType::Guide,
                entity_id: "g1".to_string(),
                date: None,
                guests: 2,
                notes: Some("Vardzia day trip".to_string()),
                contact_phone: Some("+995555000111".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(booking.total_price, Decimal::ZERO);
    assert_eq!(booking.entity_name, "Gina Beridze");
    assert_eq!(booking.provider_user_id.as_deref(), Some("gina"));
    assert_eq!(booking.date, None);
}

#[tokio::test]
async fn creation_rejects_invalid_requests() {
    let h = Harness::with_tour();

    let err = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 0))
        .await
        .unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::InvalidGuests));

    let err = h
        .bookings
        .create_direct_booking("alice", tour_request("missing", Some(wednesday()), 1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "TOUR_NOT_FOUND");

    let mut tour = h.store.seed_tour("t2", "paul");
    tour.is_active = false;
    h.store.put_tour(tour);
    let err = h
        .bookings
        .create_direct_booking("alice", tour_request("t2", Some(wednesday()), 1))
        .await
        .unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::EntityInactive));
}

#[tokio::test]
async fn self_booking_is_rejected_before_availability() {
    let h = Harness::with_tour();
    let mut tour = h.store.seed_tour("full", "paul");
    tour.max_people = Some(1);
    h.store.put_tour(tour);

    let err = h
        .bookings
        .create_direct_booking("paul", tour_request("full", Some(wednesday()), 5))
        .await
        .unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::SelfBooking));
    assert!(h.store.all_bookings().is_empty());
}

#[tokio::test]
async fn capacity_counts_existing_guests_for_the_date() {
    let h = Harness::with_tour();
    h.store.seed_user("bob", "Bob");
    let mut tour = h.store.seed_tour("cap", "paul");
    tour.max_people = Some(10);
    h.store.put_tour(tour);

    h.bookings
        .create_direct_booking("alice", tour_request("cap", Some(wednesday()), 7))
        .await
        .unwrap();

    let check = h
        .bookings
        .availability()
        .check_tour_availability("cap", wednesday(), 4)
        .await
        .unwrap();
    assert!(!check.available);
    assert_eq!(check.remaining_spots, 3);
    assert_eq!(check.reason.as_deref(), Some("Only 3 spots remaining for this date"));

    let err = h
        .bookings
        .create_direct_booking("bob", tour_request("cap", Some(wednesday()), 4))
        .await
        .unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::InsufficientAvailability));

    h.bookings
        .create_direct_booking("bob", tour_request("cap", Some(wednesday()), 3))
        .await
        .unwrap();

    // Another date is untouched.
    let other_day = h
        .bookings
        .availability()
        .check_tour_availability("cap", common::date(2030, 6, 6), 10)
        .await
        .unwrap();
    assert!(other_day.available);
    assert_eq!(other_day.remaining_spots, 10);
}

#[tokio::test]
async fn cancelled_and_declined_bookings_free_capacity() {
    let h = Harness::with_tour();
    h.store.seed_user("bob", "Bob");
    let mut tour = h.store.seed_tour("cap", "paul");
    tour.max_people = Some(5);
    h.store.put_tour(tour);

    let first = h
        .bookings
        .create_direct_booking("alice", tour_request("cap", Some(wednesday()), 5))
        .await
        .unwrap();
    assert!(h
        .bookings
        .create_direct_booking("bob", tour_request("cap", Some(wednesday()), 1))
        .await
        .is_err());

    h.bookings.cancel_booking(&first.id, "alice").await.unwrap();
    let second = h
        .bookings
        .create_direct_booking("bob", tour_request("cap", Some(wednesday()), 5))
        .await
        .unwrap();

    h.bookings
        .decline_booking(&second.id, "paul", "Guide is sick".to_string())
        .await
        .unwrap();
    let check = h
        .bookings
        .availability()
        .check_tour_availability("cap", wednesday(), 5)
        .await
        .unwrap();
    assert!(check.available);
    assert_eq!(check.remaining_spots, 5);
}

#[tokio::test]
async fn date_rules_are_enforced() {
    let h = Harness::with_tour();
    let mut tour = h.store.seed_tour("weekday", "paul");
    tour.availability_type = AvailabilityType::Weekdays;
    h.store.put_tour(tour);

    let err = h
        .bookings
        .create_direct_booking("alice", tour_request("weekday", Some(saturday()), 1))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "This tour is only available on weekdays (Monday to Friday)"
    );
    assert_eq!(code(err), Some(ErrorCode::InsufficientAvailability));

    let mut tour = h.store.seed_tour("specific", "paul");
    tour.availability_type = AvailabilityType::SpecificDates;
    tour.available_dates = Some(r#"["2030-06-05"]"#.to_string());
    h.store.put_tour(tour);

    assert!(h
        .bookings
        .create_direct_booking("alice", tour_request("specific", Some(wednesday()), 1))
        .await
        .is_ok());
    assert!(h
        .bookings
        .create_direct_booking("alice", tour_request("specific", Some(saturday()), 1))
        .await
        .is_err());
}

#[tokio::test]
async fn dateless_tour_bookings_need_by_request_tours() {
    let h = Harness::with_tour();

    let err = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", None, 2))
        .await
        .unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::DateRequired));

    let mut tour = h.store.seed_tour("custom", "paul");
    tour.availability_type = AvailabilityType::ByRequest;
    tour.max_people = Some(1);
    h.store.put_tour(tour);

    let booking = h
        .bookings
        .create_direct_booking("alice", tour_request("custom", None, 3))
        .await
        .unwrap();
    assert_eq!(booking.date, None);
    assert_eq!(booking.total_price, Decimal::new(300, 0));
}

#[tokio::test]
async fn terminal_states_reject_further_transitions() {
    let h = Harness::with_tour();
    let create = || h.bookings.create_direct_booking("alice", tour_request("t1", Some(wednesday()), 1));

    // confirm twice
    let b = create().await.unwrap();
    h.bookings.confirm_booking(&b.id, "paul", None).await.unwrap();
    let err = h.bookings.confirm_booking(&b.id, "paul", None).await.unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::InvalidBookingStatus));
    let err = h
        .bookings
        .decline_booking(&b.id, "paul", "late".to_string())
        .await
        .unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::InvalidBookingStatus));

    // complete, then everything else
    h.bookings.complete_booking(&b.id, "paul").await.unwrap();
    let err = h.bookings.complete_booking(&b.id, "paul").await.unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::BookingAlreadyCompleted));
    let err = h.bookings.cancel_booking(&b.id, "alice").await.unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::BookingCompleted));

    // cancel twice, then complete
    let b = create().await.unwrap();
    h.bookings.cancel_booking(&b.id, "alice").await.unwrap();
    let err = h.bookings.cancel_booking(&b.id, "alice").await.unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::BookingAlreadyCancelled));
    let err = h.bookings.complete_booking(&b.id, "paul").await.unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::BookingCancelled));

    // declined cannot be cancelled
    let b = create().await.unwrap();
    h.bookings
        .decline_booking(&b.id, "paul", "Fully booked".to_string())
        .await
        .unwrap();
    let err = h.bookings.cancel_booking(&b.id, "alice").await.unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::BookingDeclined));

    // pending cannot be completed
    let b = create().await.unwrap();
    let err = h.bookings.complete_booking(&b.id, "paul").await.unwrap_err();
    assert_eq!(code(err), Some(ErrorCode::InvalidBookingStatus));

    let stored = h.bookings.get_booking_by_id(&b.id, "alice").await.unwrap();
    assert_eq!(stored.status, BookingStatus::Pending);
}

#[tokio::test]
async fn confirmed_booking_can_be_cancelled_by_customer() {
    let h = Harness::with_tour();
    let b = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 2))
        .await
        .unwrap();
    h.bookings.confirm_booking(&b.id, "paul", None).await.unwrap();

    let cancelled = h.bookings.cancel_booking(&b.id, "alice").await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());

    h.notifier.flush().await;
    let kinds: Vec<_> = h.inbox.for_user("paul").into_iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![NotificationKind::BookingRequest, NotificationKind::BookingCancelled]
    );
}

#[tokio::test]
async fn only_the_right_party_may_act() {
    let h = Harness::with_tour();
    h.store.seed_user("mallory", "Mallory");
    let b = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 1))
        .await
        .unwrap();

    let forbidden = |r: Result<_, DomainError>| matches!(r, Err(DomainError::Forbidden(_)));

    assert!(forbidden(h.bookings.confirm_booking(&b.id, "mallory", None).await));
    assert!(forbidden(h.bookings.confirm_booking(&b.id, "alice", None).await));
    assert!(forbidden(
        h.bookings
            .decline_booking(&b.id, "mallory", "no".to_string())
            .await
    ));
    assert!(forbidden(h.bookings.cancel_booking(&b.id, "paul").await));
    assert!(forbidden(h.bookings.complete_booking(&b.id, "alice").await));
    assert!(forbidden(h.bookings.get_booking_by_id(&b.id, "mallory").await));

    assert!(h.bookings.get_booking_by_id(&b.id, "paul").await.is_ok());

    let err = h.bookings.get_booking_by_id("nope", "alice").await.unwrap_err();
    assert_eq!(err.code(), "BOOKING_NOT_FOUND");
}

#[tokio::test]
async fn ownership_follows_the_current_entity_owner() {
    let h = Harness::with_tour();
    h.store.seed_user("nina", "Nina");
    let b = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 1))
        .await
        .unwrap();

    // Tour handed over to another operator.
    let mut tour = h.store.seed_tour("t1", "nina");
    tour.title = "Tour t1".to_string();
    h.store.put_tour(tour);

    assert!(matches!(
        h.bookings.confirm_booking(&b.id, "paul", None).await,
        Err(DomainError::Forbidden(_))
    ));
    h.bookings.confirm_booking(&b.id, "nina", None).await.unwrap();

    // Entity deleted: the recorded provider may still complete.
    let b2 = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 1))
        .await
        .unwrap();
    h.bookings.confirm_booking(&b2.id, "nina", None).await.unwrap();
    h.store.remove_tour("t1");
    h.bookings.complete_booking(&b2.id, "nina").await.unwrap();
}

#[tokio::test]
async fn legacy_bookings_fall_back_to_entity_owner_for_reads() {
    let h = Harness::with_tour();
    h.store.seed_user("mallory", "Mallory");
    let mut b = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 1))
        .await
        .unwrap();
    b.provider_user_id = None;
    h.store.put_booking(b.clone());

    assert!(h.bookings.get_booking_by_id(&b.id, "paul").await.is_ok());
    assert!(matches!(
        h.bookings.get_booking_by_id(&b.id, "mallory").await,
        Err(DomainError::Forbidden(_))
    ));
}

#[tokio::test]
async fn failing_delivery_never_fails_the_transition() {
    let inbox = Arc::new(InMemoryNotificationSink::new());
    let h = Harness::with_sinks(inbox, Arc::new(FailingSink), Arc::new(InMemoryEmailSink::new()));
    h.store.seed_user("alice", "Alice");
    h.store.seed_user("paul", "Paul");
    h.store.seed_tour("t1", "paul");

    let b = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 2))
        .await
        .unwrap();
    let confirmed = h.bookings.confirm_booking(&b.id, "paul", None).await.unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    h.notifier.flush().await;
    // The email channel is independent of the failed in-app one.
    assert_eq!(h.mail.sent_to("alice@example.com").len(), 1);
    let stored = h.bookings.get_booking_by_id(&b.id, "alice").await.unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn missing_recipient_is_skipped_quietly() {
    let h = Harness::new();
    // Provider exists as a tour owner but has no user row.
    h.store.seed_user("alice", "Alice");
    h.store.seed_tour("t1", "ghost");

    let b = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 1))
        .await
        .unwrap();
    h.notifier.flush().await;
    assert!(h.inbox.for_user("ghost").is_empty());
    assert_eq!(b.provider_name, None);
}

#[tokio::test]
async fn booking_lists_are_filtered_and_paged() {
    let h = Harness::with_tour();
    h.store.seed_user("gina", "Gina");
    h.store.seed_guide("g1", "gina");

    for _ in 0..3 {
        h.bookings
            .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 1))
            .await
            .unwrap();
    }
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let guide = h
        .bookings
        .create_direct_booking(
            "alice",
            DirectBookingRequest {
                entity_type: EntityType::Guide,
                entity_id: "g1".to_string(),
                date: Some(wednesday()),
                guests: 1,
                notes: None,
                contact_phone: None,
            },
        )
        .await
        .unwrap();

    let all = h
        .bookings
        .get_user_bookings("alice", PaginationParams::new(1, 2), BookingFilter::default())
        .await
        .unwrap();
    assert_eq!(all.total, 4);
    assert_eq!(all.items.len(), 2);
    assert_eq!(all.items[0].id, guide.id, "newest first");

    let tours_only = h
        .bookings
        .get_user_bookings(
            "alice",
            PaginationParams::new(1, 20),
            BookingFilter {
                entity_type: Some(EntityType::Tour),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(tours_only.total, 3);

    let received = h
        .bookings
        .get_received_bookings("paul", PaginationParams::new(1, 20), BookingFilter::default())
        .await
        .unwrap();
    assert_eq!(received.total, 3);

    let confirmed = h
        .bookings
        .get_received_bookings(
            "gina",
            PaginationParams::new(1, 20),
            BookingFilter {
                status: Some(BookingStatus::Confirmed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(confirmed.total, 0);
}

#[tokio::test]
async fn email_preference_suppresses_mail_but_not_in_app() {
    let h = Harness::with_tour();
    let mut paul = User::new("paul", "Paul", "paul@example.com");
    paul.email_notifications = false;
    h.store.put_user(paul);

    let booking = h
        .bookings
        .create_direct_booking("alice", tour_request("t1", Some(wednesday()), 2))
        .await
        .unwrap();
    h.notifier.flush().await;

    let inbox = h.inbox.for_user("paul");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::BookingRequest);
    assert_eq!(inbox[0].booking_id.as_deref(), Some(booking.id.as_str()));
    assert!(h.mail.sent_to("paul@example.com").is_empty());

    // Customer still opted in.
    h.bookings.confirm_booking(&booking.id, "paul", None).await.unwrap();
    h.notifier.flush().await;
    assert_eq!(h.mail.sent_to("alice@example.com").len(), 1);
}
