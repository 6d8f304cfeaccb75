//! Prometheus scrape endpoint and per-route HTTP metrics

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register help text for every metric the service emits.
pub fn describe_metrics() {
    metrics::describe_counter!("http_requests_total", "HTTP requests by method, route and status");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        metrics::Unit::Seconds,
        "HTTP request latency by method and route"
    );
    metrics::describe_counter!(
        "bookings_created_total",
        "Bookings created, by entity type and creation path (direct or internal)"
    );
    metrics::describe_counter!(
        "booking_transitions_total",
        "Booking status transitions, by target status"
    );
    metrics::describe_counter!(
        "inquiry_responses_total",
        "Inquiry responses recorded, by status"
    );
    metrics::describe_counter!(
        "inquiry_responses_expired_total",
        "Pending inquiry responses moved to EXPIRED"
    );
    metrics::describe_counter!(
        "notifications_failed_total",
        "Notification deliveries that failed, by channel"
    );
}

/// `GET /metrics`
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}

/// Records `http_requests_total` and `http_request_duration_seconds`.
///
/// Labels use the matched route template (`/api/v1/bookings/{booking_id}`)
/// so ids do not explode label cardinality; unmatched requests are
/// grouped under `unmatched`.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => route.clone(),
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => route)
        .record(elapsed);

    response
}
