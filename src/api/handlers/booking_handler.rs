//! Booking handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Booking, BookingDetail, BookingFull};
use crate::errors::AppResult;

/// Booking list query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingQuery {
    /// Narrow the list to one hotel (owners and admins)
    pub hotel_id: Option<Uuid>,
}

/// Booking list payload
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingDetail>,
}

/// Single booking payload
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub booking: Booking,
}

/// Single booking payload with full hotel and room records
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingFullResponse {
    pub booking: BookingFull,
}

/// New booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    /// First night of the stay
    #[schema(example = "2025-03-10")]
    pub check_in_date: NaiveDate,
    /// Check-out day, not slept in
    #[schema(example = "2025-03-12")]
    pub check_out_date: NaiveDate,
    /// Room price times nights, in rupees; verified server-side
    #[validate(range(min = 1, message = "Total amount must be positive"))]
    #[schema(example = 13000)]
    pub total_amount: i64,
}

/// Create authenticated booking routes
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/:id", get(get_booking))
        .route("/bookings/:id/cancel", put(cancel_booking))
}

/// List bookings visible to the caller
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings, newest first", body = BookingListResponse),
        (status = 403, description = "Hotel filter outside the caller's portfolio")
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<BookingListResponse>> {
    let bookings = state
        .booking_service
        .list(user.id, user.role, query.hotel_id)
        .await?;

    Ok(Json(BookingListResponse { bookings }))
}

/// Book a room
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created awaiting payment", body = BookingResponse),
        (status = 400, description = "Bad dates or amount"),
        (status = 404, description = "Hotel or room not found")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = state
        .booking_service
        .create(
            user.id,
            payload.hotel_id,
            payload.room_id,
            payload.check_in_date,
            payload.check_out_date,
            payload.total_amount,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(BookingResponse { booking })))
}

/// Get one booking
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking with hotel and room", body = BookingFullResponse),
        (status = 403, description = "Not the guest, hotel owner or an admin"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingFullResponse>> {
    let booking = state.booking_service.get(user.id, user.role, id).await?;

    Ok(Json(BookingFullResponse { booking }))
}

/// Cancel a paid booking
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking cancelled and refunded", body = BookingResponse),
        (status = 400, description = "Booking is not paid and confirmed"),
        (status = 403, description = "Not the guest or an admin"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .booking_service
        .cancel(user.id, user.role, id)
        .await?;

    Ok(Json(BookingResponse { booking }))
}
