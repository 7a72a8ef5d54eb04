//! Cabin availability handler

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::interfaces::http::error::{ApiError, ErrorBody};
use crate::interfaces::http::modules::BookingState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/cabins",
    tag = "Cabins",
    security(("bearer_auth" = [])),
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Cabins offered for the stay; empty when nothing fits", body = Vec<CabinDto>),
        (status = 400, description = "Missing or invalid parameters", body = ErrorBody),
        (status = 401, description = "API key missing or invalid", body = ErrorBody),
        (status = 408, description = "Request exceeded the configured deadline", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn check_availability(
    State(state): State<BookingState>,
    params: Result<Query<AvailabilityParams>, QueryRejection>,
) -> Result<Json<Vec<CabinDto>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::invalid(e.body_text()))?;
    let request = params.parse(state.booking.settings().utc_offset)?;

    let cabins = state
        .booking
        .check_availability(&request.stay, request.party_size)
        .await?;

    Ok(Json(cabins.into_iter().map(CabinDto::from).collect()))
}
