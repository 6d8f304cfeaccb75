//! Tour availability lookup

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{AvailabilityChecker, AvailabilityResult};
use crate::interfaces::http::common::params::parse_date;
use crate::interfaces::http::common::{ApiError, ApiResponse};

#[derive(Clone)]
pub struct TourAppState {
    pub availability: Arc<AvailabilityChecker>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Party size. Default: 1
    #[serde(default = "default_guests")]
    pub guests: i32,
}

fn default_guests() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub available: bool,
    /// 999 for tours without a capacity limit
    pub remaining_spots: i32,
    pub reason: Option<String>,
}

impl From<AvailabilityResult> for AvailabilityDto {
    fn from(r: AvailabilityResult) -> Self {
        Self {
            available: r.available,
            remaining_spots: r.remaining_spots,
            reason: r.reason,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/tours/{tour_id}/availability",
    tag = "Tours",
    params(
        ("tour_id" = String, Path, description = "Tour ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability for the date", body = ApiResponse<AvailabilityDto>),
        (status = 404, description = "Tour not found"),
        (status = 422, description = "Invalid date or guest count")
    )
)]
pub async fn check_availability(
    State(state): State<TourAppState>,
    Path(tour_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilityDto>>, ApiError> {
    let date = parse_date("date", &query.date)?;
    if query.guests < 1 {
        return Err(ApiError::unprocessable(
            "INVALID_GUESTS",
            "guests must be at least 1",
        ));
    }

    let result = state
        .availability
        .check_tour_availability(&tour_id, date, query.guests)
        .await?;
    Ok(Json(ApiResponse::success(result.into())))
}
