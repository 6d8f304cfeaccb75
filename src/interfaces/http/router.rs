//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AvailabilityChecker, BookingService, InquiryService};
use crate::domain::RepositoryProvider;
use crate::notifications::Notifier;

use super::common::{ApiResponse, PaginatedResponse};
use super::modules::bookings::{self, BookingAppState, BookingDto};
use super::modules::health::{self, HealthState};
use super::modules::inquiries::{self, InquiryAppState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::tours::{self, TourAppState};

/// Shared state for every route. Handlers extract their own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub bookings: Arc<BookingService>,
    pub inquiries: Arc<InquiryService>,
    pub availability: Arc<AvailabilityChecker>,
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
    pub prometheus: PrometheusHandle,
}

impl ApiState {
    /// Wire the services over `repos`. `db` is only used by the health check.
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifier: Notifier,
        db: Option<DatabaseConnection>,
        prometheus: PrometheusHandle,
    ) -> Self {
        let bookings = Arc::new(BookingService::new(repos.clone(), notifier.clone()));
        let inquiries = Arc::new(InquiryService::new(
            repos.clone(),
            bookings.clone(),
            notifier,
        ));
        Self {
            bookings,
            inquiries,
            availability: Arc::new(AvailabilityChecker::new(repos)),
            db,
            started_at: Arc::new(Instant::now()),
            prometheus,
        }
    }
}

impl FromRef<ApiState> for BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        BookingAppState {
            bookings: Arc::clone(&s.bookings),
        }
    }
}

impl FromRef<ApiState> for InquiryAppState {
    fn from_ref(s: &ApiState) -> Self {
        InquiryAppState {
            inquiries: Arc::clone(&s.inquiries),
        }
    }
}

impl FromRef<ApiState> for TourAppState {
    fn from_ref(s: &ApiState) -> Self {
        TourAppState {
            availability: Arc::clone(&s.availability),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        MetricsState {
            handle: s.prometheus.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-User-Id",
                    "Caller id, set by the authenticating gateway",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        bookings::create_booking,
        bookings::list_my_bookings,
        bookings::list_received_bookings,
        bookings::get_booking,
        bookings::confirm_booking,
        bookings::decline_booking,
        bookings::cancel_booking,
        bookings::complete_booking,
        tours::check_availability,
        inquiries::create_inquiry,
        inquiries::get_inquiry,
        inquiries::respond_to_inquiry,
    ),
    components(
        schemas(
            ApiResponse<String>,
            ApiResponse<BookingDto>,
            PaginatedResponse<BookingDto>,
            health::HealthResponse,
            health::ComponentHealth,
            bookings::CreateBookingRequest,
            bookings::ConfirmBookingRequest,
            bookings::DeclineBookingRequest,
            BookingDto,
            tours::AvailabilityDto,
            inquiries::CreateInquiryRequest,
            inquiries::RespondInquiryRequest,
            inquiries::InquiryDto,
            inquiries::InquiryResponseDto,
            inquiries::InquiryThreadDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Bookings", description = "Direct bookings and the provider confirm/decline/complete lifecycle"),
        (name = "Tours", description = "Tour availability by date"),
        (name = "Inquiries", description = "Multi-recipient inquiries; accepted responses become confirmed bookings"),
    ),
    info(
        title = "Tour Booking API",
        version = "1.0.0",
        description = "Booking lifecycle and inquiry handling for tours, guides and drivers"
    )
)]
pub struct ApiDoc;

/// Build the full HTTP surface.
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/api/v1/bookings",
            get(bookings::list_my_bookings).post(bookings::create_booking),
        )
        .route(
            "/api/v1/bookings/received",
            get(bookings::list_received_bookings),
        )
        .route("/api/v1/bookings/{booking_id}", get(bookings::get_booking))
        .route(
            "/api/v1/bookings/{booking_id}/confirm",
            post(bookings::confirm_booking),
        )
        .route(
            "/api/v1/bookings/{booking_id}/decline",
            post(bookings::decline_booking),
        )
        .route(
            "/api/v1/bookings/{booking_id}/cancel",
            post(bookings::cancel_booking),
        )
        .route(
            "/api/v1/bookings/{booking_id}/complete",
            post(bookings::complete_booking),
        )
        .route(
            "/api/v1/tours/{tour_id}/availability",
            get(tours::check_availability),
        )
        .route("/api/v1/inquiries", post(inquiries::create_inquiry))
        .route("/api/v1/inquiries/{inquiry_id}", get(inquiries::get_inquiry))
        .route(
            "/api/v1/inquiries/{inquiry_id}/respond",
            post(inquiries::respond_to_inquiry),
        )
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        .with_state(state);

    let swagger = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger)
        .merge(api)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
