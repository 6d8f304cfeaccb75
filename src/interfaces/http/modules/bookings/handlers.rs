//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::{BookingService, DirectBookingRequest};
use crate::domain::BookingFilter;
use crate::interfaces::http::common::params::{
    parse_booking_status, parse_entity_type, parse_optional_date,
};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, CurrentUser, PaginatedResponse, ValidatedJson,
};
use crate::shared::PaginationParams;

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<BookingService>,
}

type BookingResult = Result<Json<ApiResponse<BookingDto>>, ApiError>;

fn list_params(query: &BookingListQuery) -> Result<(PaginationParams, BookingFilter), ApiError> {
    let filter = BookingFilter {
        status: query.status.as_deref().map(parse_booking_status).transpose()?,
        entity_type: query.entity_type.as_deref().map(parse_entity_type).transpose()?,
    };
    Ok((PaginationParams::new(query.page, query.limit), filter))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("user_id" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking request created (PENDING)", body = ApiResponse<BookingDto>),
        (status = 404, description = "Entity not found"),
        (status = 422, description = "Business rule violated (SELF_BOOKING, ENTITY_INACTIVE, INSUFFICIENT_AVAILABILITY, ...)")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let entity_type = parse_entity_type(&request.entity_type)?;
    let date = parse_optional_date("date", request.date.as_deref())?;

    let booking = state
        .bookings
        .create_direct_booking(
            user.id(),
            DirectBookingRequest {
                entity_type,
                entity_id: request.entity_id,
                date,
                guests: request.guests,
                notes: request.notes,
                contact_phone: request.contact_phone,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(booking.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("user_id" = [])),
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings made by the caller, newest first", body = ApiResponse<PaginatedResponse<BookingDto>>)
    )
)]
pub async fn list_my_bookings(
    State(state): State<BookingAppState>,
    user: CurrentUser,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<BookingDto>>>, ApiError> {
    let (page, filter) = list_params(&query)?;
    let result = state.bookings.get_user_bookings(user.id(), page, filter).await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
        BookingDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/received",
    tag = "Bookings",
    security(("user_id" = [])),
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings received by the caller as a provider", body = ApiResponse<PaginatedResponse<BookingDto>>)
    )
)]
pub async fn list_received_bookings(
    State(state): State<BookingAppState>,
    user: CurrentUser,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<BookingDto>>>, ApiError> {
    let (page, filter) = list_params(&query)?;
    let result = state
        .bookings
        .get_received_bookings(user.id(), page, filter)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
        BookingDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    security(("user_id" = [])),
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 403, description = "Caller is neither customer nor provider"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    user: CurrentUser,
    Path(booking_id): Path<String>,
) -> BookingResult {
    let booking = state.bookings.get_booking_by_id(&booking_id, user.id()).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/confirm",
    tag = "Bookings",
    security(("user_id" = [])),
    params(("booking_id" = String, Path, description = "Booking ID")),
    request_body = ConfirmBookingRequest,
    responses(
        (status = 200, description = "Booking confirmed", body = ApiResponse<BookingDto>),
        (status = 403, description = "Caller does not own the booked entity"),
        (status = 422, description = "Booking is not PENDING")
    )
)]
pub async fn confirm_booking(
    State(state): State<BookingAppState>,
    user: CurrentUser,
    Path(booking_id): Path<String>,
    ValidatedJson(request): ValidatedJson<ConfirmBookingRequest>,
) -> BookingResult {
    let booking = state
        .bookings
        .confirm_booking(&booking_id, user.id(), request.provider_notes)
        .await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/decline",
    tag = "Bookings",
    security(("user_id" = [])),
    params(("booking_id" = String, Path, description = "Booking ID")),
    request_body = DeclineBookingRequest,
    responses(
        (status = 200, description = "Booking declined", body = ApiResponse<BookingDto>),
        (status = 403, description = "Caller does not own the booked entity"),
        (status = 422, description = "Booking is not PENDING")
    )
)]
pub async fn decline_booking(
    State(state): State<BookingAppState>,
    user: CurrentUser,
    Path(booking_id): Path<String>,
    ValidatedJson(request): ValidatedJson<DeclineBookingRequest>,
) -> BookingResult {
    let booking = state
        .bookings
        .decline_booking(&booking_id, user.id(), request.declined_reason)
        .await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/cancel",
    tag = "Bookings",
    security(("user_id" = [])),
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingDto>),
        (status = 403, description = "Only the customer may cancel"),
        (status = 422, description = "Booking already terminal")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    user: CurrentUser,
    Path(booking_id): Path<String>,
) -> BookingResult {
    let booking = state.bookings.cancel_booking(&booking_id, user.id()).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/complete",
    tag = "Bookings",
    security(("user_id" = [])),
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking completed", body = ApiResponse<BookingDto>),
        (status = 403, description = "Caller does not own the booked entity"),
        (status = 422, description = "Booking is not CONFIRMED")
    )
)]
pub async fn complete_booking(
    State(state): State<BookingAppState>,
    user: CurrentUser,
    Path(booking_id): Path<String>,
) -> BookingResult {
    let booking = state.bookings.complete_booking(&booking_id, user.id()).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}
