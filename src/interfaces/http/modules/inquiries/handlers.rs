//! Inquiry HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::{InquiryService, NewInquiry};
use crate::domain::{InquiryResponseStatus, InquiryTargetType};
use crate::interfaces::http::common::params::parse_optional_date;
use crate::interfaces::http::common::{ApiError, ApiResponse, CurrentUser, ValidatedJson};

use super::dto::*;

#[derive(Clone)]
pub struct InquiryAppState {
    pub inquiries: Arc<InquiryService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/inquiries",
    tag = "Inquiries",
    security(("user_id" = [])),
    request_body = CreateInquiryRequest,
    responses(
        (status = 201, description = "Inquiry sent; one pending response per recipient", body = ApiResponse<InquiryThreadDto>),
        (status = 404, description = "A target does not exist"),
        (status = 422, description = "Invalid inquiry")
    )
)]
pub async fn create_inquiry(
    State(state): State<InquiryAppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateInquiryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InquiryThreadDto>>), ApiError> {
    let target_type = InquiryTargetType::parse(request.target_type.trim()).ok_or_else(|| {
        ApiError::unprocessable(
            "INVALID_TARGET_TYPE",
            format!(
                "Unknown target type '{}', expected TOUR, GUIDE, DRIVER or COMPANY",
                request.target_type
            ),
        )
    })?;
    let requested_date =
        parse_optional_date("requested_date", request.requested_date.as_deref())?;

    let thread = state
        .inquiries
        .create_inquiry(
            user.id(),
            NewInquiry {
                target_type,
                target_ids: request.target_ids,
                subject: request.subject,
                message: request.message,
                requested_date,
                guests: request.guests,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(thread.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/inquiries/{inquiry_id}",
    tag = "Inquiries",
    security(("user_id" = [])),
    params(("inquiry_id" = String, Path, description = "Inquiry ID")),
    responses(
        (status = 200, description = "Inquiry thread", body = ApiResponse<InquiryThreadDto>),
        (status = 403, description = "Caller is neither the sender nor a recipient"),
        (status = 404, description = "Inquiry not found")
    )
)]
pub async fn get_inquiry(
    State(state): State<InquiryAppState>,
    user: CurrentUser,
    Path(inquiry_id): Path<String>,
) -> Result<Json<ApiResponse<InquiryThreadDto>>, ApiError> {
    let thread = state.inquiries.get_inquiry(&inquiry_id, user.id()).await?;
    Ok(Json(ApiResponse::success(thread.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/inquiries/{inquiry_id}/respond",
    tag = "Inquiries",
    security(("user_id" = [])),
    params(("inquiry_id" = String, Path, description = "Inquiry ID")),
    request_body = RespondInquiryRequest,
    responses(
        (status = 200, description = "Response recorded; ACCEPTED creates confirmed bookings", body = ApiResponse<InquiryResponseDto>),
        (status = 403, description = "Caller is not a recipient"),
        (status = 422, description = "Invalid status or response already final")
    )
)]
pub async fn respond_to_inquiry(
    State(state): State<InquiryAppState>,
    user: CurrentUser,
    Path(inquiry_id): Path<String>,
    ValidatedJson(request): ValidatedJson<RespondInquiryRequest>,
) -> Result<Json<ApiResponse<InquiryResponseDto>>, ApiError> {
    let status = InquiryResponseStatus::parse(request.status.trim()).ok_or_else(|| {
        ApiError::unprocessable(
            "INVALID_RESPONSE_STATUS",
            format!("Unknown response status '{}'", request.status),
        )
    })?;

    let response = state
        .inquiries
        .respond_to_inquiry(&inquiry_id, user.id(), status, request.message)
        .await?;
    Ok(Json(ApiResponse::success(response.into())))
}
