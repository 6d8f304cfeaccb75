mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::Harness;
use tour_booking::{create_api_router, ApiState};

fn app(h: &Harness) -> Router {
    let prometheus = PrometheusBuilder::new().build_recorder().handle();
    create_api_router(ApiState::new(
        h.repos.clone(),
        h.notifier.clone(),
        None,
        prometheus,
    ))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn booking_body(guests: i32) -> Value {
    json!({
        "entity_type": "TOUR",
        "entity_id": "t1",
        "date": "2030-06-05",
        "guests": guests,
        "notes": "Vegetarian lunch please"
    })
}

#[tokio::test]
async fn booking_round_trip_over_http() {
    let h = Harness::with_tour();
    let app = app(&h);

    let (status, body) = send(&app, "POST", "/api/v1/bookings", Some("alice"), Some(booking_body(4))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "PENDING");
    assert_eq!(body["data"]["total_price"], 400.0);
    assert_eq!(body["data"]["currency"], "GEL");
    assert_eq!(body["data"]["date"], "2030-06-05");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/bookings/{}/confirm", id),
        Some("paul"),
        Some(json!({ "provider_notes": "Bring warm clothes" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "CONFIRMED");
    assert_eq!(body["data"]["provider_notes"], "Bring warm clothes");

    let (status, body) = send(&app, "GET", &format!("/api/v1/bookings/{}", id), Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "CONFIRMED");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/bookings/{}/complete", id),
        Some("paul"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "COMPLETED");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/bookings/{}/cancel", id),
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "BOOKING_COMPLETED");
}

#[tokio::test]
async fn missing_identity_is_401() {
    let h = Harness::with_tour();
    let (status, body) = send(&app(&h), "POST", "/api/v1/bookings", None, Some(booking_body(1))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn domain_errors_map_to_status_and_code() {
    let h = Harness::with_tour();
    h.store.seed_user("mallory", "Mallory");
    let app = app(&h);

    let (status, body) = send(&app, "POST", "/api/v1/bookings", Some("paul"), Some(booking_body(1))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "SELF_BOOKING");
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, "POST", "/api/v1/bookings", Some("alice"), Some(booking_body(0))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_GUESTS");

    let (status, body) = send(&app, "GET", "/api/v1/bookings/nope", Some("alice"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "BOOKING_NOT_FOUND");

    let (_, created) = send(&app, "POST", "/api/v1/bookings", Some("alice"), Some(booking_body(1))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let (status, body) = send(&app, "GET", &format!("/api/v1/bookings/{}", id), Some("mallory"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn request_fields_are_validated() {
    let h = Harness::with_tour();
    let app = app(&h);

    let mut body = booking_body(1);
    body["entity_type"] = json!("BOAT");
    let (status, resp) = send(&app, "POST", "/api/v1/bookings", Some("alice"), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["code"], "INVALID_ENTITY_TYPE");

    let mut body = booking_body(1);
    body["date"] = json!("05/06/2030");
    let (status, resp) = send(&app, "POST", "/api/v1/bookings", Some("alice"), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["code"], "INVALID_DATE");

    let (_, created) = send(&app, "POST", "/api/v1/bookings", Some("alice"), Some(booking_body(1))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let (status, resp) = send(
        &app,
        "POST",
        &format!("/api/v1/bookings/{}/decline", id),
        Some("paul"),
        Some(json!({ "declined_reason": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["code"], "VALIDATION_ERROR");

    let (status, resp) = send(&app, "GET", "/api/v1/bookings?status=LOST", Some("alice"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["code"], "INVALID_STATUS");
}

#[tokio::test]
async fn booking_lists_are_scoped_to_the_caller() {
    let h = Harness::with_tour();
    let app = app(&h);

    for _ in 0..3 {
        send(&app, "POST", "/api/v1/bookings", Some("alice"), Some(booking_body(1))).await;
    }

    let (status, body) = send(&app, "GET", "/api/v1/bookings?page=1&limit=2", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total_pages"], 2);

    let (_, body) = send(&app, "GET", "/api/v1/bookings/received?status=pending", Some("paul"), None).await;
    assert_eq!(body["data"]["total"], 3);

    let (_, body) = send(&app, "GET", "/api/v1/bookings", Some("paul"), None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn tour_availability_endpoint() {
    let h = Harness::with_tour();
    let app = app(&h);

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/tours/t1/availability?date=2030-06-05&guests=2",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["available"], true);
    assert_eq!(body["data"]["remaining_spots"], 999);

    let (status, body) = send(&app, "GET", "/api/v1/tours/zzz/availability?date=2030-06-05", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TOUR_NOT_FOUND");

    let (status, body) = send(&app, "GET", "/api/v1/tours/t1/availability?date=tomorrow", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_DATE");
}

#[tokio::test]
async fn inquiry_accept_over_http_creates_booking() {
    let h = Harness::new();
    h.store.seed_user("alice", "Alice");
    h.store.seed_user("gina", "Gina");
    h.store.seed_guide("g1", "gina");
    let app = app(&h);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/inquiries",
        Some("alice"),
        Some(json!({
            "target_type": "GUIDE",
            "target_ids": ["g1"],
            "subject": "Svaneti hike",
            "message": "Four days in July?",
            "requested_date": "2030-07-01",
            "guests": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let inquiry_id = body["data"]["inquiry"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["responses"][0]["status"], "PENDING");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/inquiries/{}/respond", inquiry_id),
        Some("gina"),
        Some(json!({ "status": "MAYBE" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_RESPONSE_STATUS");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/inquiries/{}/respond", inquiry_id),
        Some("gina"),
        Some(json!({ "status": "accepted", "message": "Happy to" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ACCEPTED");

    let (_, body) = send(&app, "GET", "/api/v1/bookings", Some("alice"), None).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["status"], "CONFIRMED");
    assert_eq!(body["data"]["items"][0]["inquiry_id"], inquiry_id.as_str());

    let (status, body) = send(&app, "GET", &format!("/api/v1/inquiries/{}", inquiry_id), Some("gina"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["responses"][0]["status"], "ACCEPTED");
}

#[tokio::test]
async fn health_docs_and_request_ids() {
    let h = Harness::new();
    let app = app(&h);

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"]["backend"], "memory");

    let (status, body) = send(&app, "GET", "/api-doc/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/bookings/{booking_id}/confirm"].is_object());

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-42")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-42");

    let (status, _) = send(&app, "GET", "/metrics", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
