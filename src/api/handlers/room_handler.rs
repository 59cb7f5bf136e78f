//! Room inventory handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Room, RoomDraft, RoomPatch};
use crate::errors::{AppError, AppResult};
use crate::types::MessageResponse;

/// Room list query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RoomQuery {
    /// Hotel to list rooms for
    pub hotel_id: Option<Uuid>,
}

/// Room list payload
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomListResponse {
    pub rooms: Vec<Room>,
}

/// Single room payload
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub room: Room,
}

/// New room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    /// Hotel the room belongs to
    pub hotel_id: Uuid,
    /// Room category label such as "Deluxe"
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Room type is required"))]
    #[schema(example = "Deluxe")]
    pub room_type: String,
    /// Price per night in rupees
    #[validate(range(min = 1, message = "Price must be positive"))]
    #[schema(example = 6500)]
    pub price: i64,
    /// Maximum number of guests
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    #[schema(example = 2)]
    pub capacity: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<CreateRoomRequest> for RoomDraft {
    fn from(req: CreateRoomRequest) -> Self {
        Self {
            hotel_id: req.hotel_id,
            room_type: req.room_type,
            price: req.price,
            capacity: req.capacity,
            description: req.description,
            images: req.images,
        }
    }
}

/// Partial room update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Room type must not be empty"))]
    pub room_type: Option<String>,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: Option<i64>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

impl From<UpdateRoomRequest> for RoomPatch {
    fn from(req: UpdateRoomRequest) -> Self {
        Self {
            room_type: req.room_type,
            price: req.price,
            capacity: req.capacity,
            description: req.description,
            images: req.images,
            is_available: req.is_available,
        }
    }
}

/// Create public room routes
pub fn room_public_routes() -> Router<AppState> {
    Router::new().route("/rooms", get(list_rooms))
}

/// Create authenticated room routes
pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", post(create_room))
        .route("/rooms/:id", put(update_room).delete(delete_room))
}

/// List the rooms of a hotel
#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "Rooms",
    params(RoomQuery),
    responses(
        (status = 200, description = "Rooms of the hotel", body = RoomListResponse),
        (status = 400, description = "hotelId missing")
    )
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<RoomQuery>,
) -> AppResult<Json<RoomListResponse>> {
    let hotel_id = query
        .hotel_id
        .ok_or_else(|| AppError::validation("hotelId required"))?;

    let rooms = state.room_service.list(hotel_id).await?;

    Ok(Json(RoomListResponse { rooms }))
}

/// Add a room to a hotel
#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = "Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 403, description = "Caller does not own the hotel"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<RoomResponse>)> {
    let room = state
        .room_service
        .create(user.id, user.role, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(RoomResponse { room })))
}

/// Update a room
#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "Room id")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = RoomResponse),
        (status = 403, description = "Caller does not own the hotel"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRoomRequest>,
) -> AppResult<Json<RoomResponse>> {
    let room = state
        .room_service
        .update(user.id, user.role, id, payload.into())
        .await?;

    Ok(Json(RoomResponse { room }))
}

/// Delete a room
#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room deleted", body = MessageResponse),
        (status = 403, description = "Caller does not own the hotel"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.room_service.delete(user.id, user.role, id).await?;

    Ok(Json(MessageResponse::new("Room deleted")))
}
