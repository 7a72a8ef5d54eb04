//! Reservation HTTP handlers

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::interfaces::http::common::ValidatedJson;
use crate::interfaces::http::error::{ApiError, ErrorBody};
use crate::interfaces::http::modules::BookingState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(ReservationListParams),
    responses(
        (status = 200, description = "Reservations in the requested period", body = Vec<ReservationDto>),
        (status = 400, description = "Missing parameters or invalid combination", body = ErrorBody),
        (status = 401, description = "API key missing or invalid", body = ErrorBody),
        (status = 408, description = "Request exceeded the configured deadline", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn list_reservations(
    State(state): State<BookingState>,
    params: Result<Query<ReservationListParams>, QueryRejection>,
) -> Result<Json<Vec<ReservationDto>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::invalid(e.body_text()))?;
    let query = params.to_query(state.booking.settings().utc_offset)?;

    let reservations = state.booking.list_reservations(&query).await?;
    Ok(Json(
        reservations.into_iter().map(ReservationDto::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDto),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Reservation not found", body = ErrorBody)
    )
)]
pub async fn get_reservation(
    State(state): State<BookingState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ReservationDto>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::invalid(e.body_text()))?;
    let reservation = state.booking.get_reservation(id).await?;
    Ok(Json(ReservationDto::from(reservation)))
}

#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = CreateReservationResponse),
        (status = 400, description = "Missing or invalid parameters, unknown cabin", body = ErrorBody),
        (status = 401, description = "API key missing or invalid", body = ErrorBody),
        (status = 409, description = "A requested cabin is already booked for an overlapping stay", body = ErrorBody),
        (status = 408, description = "Request exceeded the configured deadline", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn create_reservation(
    State(state): State<BookingState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), ApiError> {
    let new = request.into_new_reservation(state.booking.settings().utc_offset)?;
    let id = state.booking.create_reservation(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateReservationResponse::created(id)),
    ))
}
