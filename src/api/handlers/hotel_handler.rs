//! Hotel catalogue handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::HOTEL_PAGE_SIZE;
use crate::domain::{Hotel, HotelDraft, HotelFilters, HotelPatch, HotelWithOwner};
use crate::errors::AppResult;
use crate::services::HotelDetail;
use crate::types::{MessageResponse, PaginationMeta, PaginationParams};

fn default_page() -> u64 {
    1
}

fn default_hotel_limit() -> u64 {
    HOTEL_PAGE_SIZE
}

/// Hotel search query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HotelQuery {
    /// Filter by city, case-insensitive substring match
    pub city: Option<String>,
    /// Minimum price per night in rupees
    pub min_price: Option<i64>,
    /// Maximum price per night in rupees
    pub max_price: Option<i64>,
    /// Minimum average rating
    pub rating: Option<f64>,
    /// Free-text search over name, city and description
    pub search: Option<String>,
    /// Filter by owning user
    pub owner_id: Option<Uuid>,
    /// Page number, 1-based
    #[serde(default = "default_page")]
    pub page: u64,
    /// Results per page
    #[serde(default = "default_hotel_limit")]
    pub limit: u64,
}

impl HotelQuery {
    fn into_parts(self) -> (HotelFilters, PaginationParams) {
        let filters = HotelFilters {
            city: self.city,
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.rating,
            search: self.search,
            owner_id: self.owner_id,
        };
        let page = PaginationParams {
            page: self.page,
            limit: self.limit,
        };
        (filters, page)
    }
}

/// Hotel search results with pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelListResponse {
    pub hotels: Vec<HotelWithOwner>,
    pub pagination: PaginationMeta,
}

/// Single hotel payload
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelResponse {
    pub hotel: Hotel,
}

/// New hotel listing request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Taj Palace Heritage")]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "City is required"))]
    #[schema(example = "Jaipur")]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    #[schema(example = "Rajasthan")]
    pub state: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    /// Starting price per night in rupees
    #[validate(range(min = 1, message = "Price must be positive"))]
    #[schema(example = 8500)]
    pub price_per_night: i64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<CreateHotelRequest> for HotelDraft {
    fn from(req: CreateHotelRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            city: req.city,
            state: req.state,
            address: req.address,
            price_per_night: req.price_per_night,
            amenities: req.amenities,
            images: req.images,
        }
    }
}

/// Partial hotel update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price_per_night: Option<i64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    /// Approval flag, admin only
    pub is_approved: Option<bool>,
}

impl From<UpdateHotelRequest> for HotelPatch {
    fn from(req: UpdateHotelRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            city: req.city,
            state: req.state,
            address: req.address,
            price_per_night: req.price_per_night,
            amenities: req.amenities,
            images: req.images,
            is_approved: req.is_approved,
        }
    }
}

/// Create public hotel routes
pub fn hotel_public_routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(search_hotels))
        .route("/hotels/:id", get(hotel_detail))
}

/// Create authenticated hotel routes
pub fn hotel_routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", post(create_hotel))
        .route("/hotels/:id", axum::routing::put(update_hotel).delete(delete_hotel))
}

/// Search hotels
#[utoipa::path(
    get,
    path = "/api/hotels",
    tag = "Hotels",
    params(HotelQuery),
    responses(
        (status = 200, description = "Matching hotels, newest first", body = HotelListResponse)
    )
)]
pub async fn search_hotels(
    State(state): State<AppState>,
    Query(query): Query<HotelQuery>,
) -> AppResult<Json<HotelListResponse>> {
    let (filters, page) = query.into_parts();
    let result = state.hotel_service.search(filters, page).await?;

    Ok(Json(HotelListResponse {
        hotels: result.data,
        pagination: result.pagination,
    }))
}

/// Get a hotel with its rooms and reviews
#[utoipa::path(
    get,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    params(("id" = Uuid, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel with rooms and reviews", body = HotelDetail),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn hotel_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<HotelDetail>> {
    let detail = state.hotel_service.detail(id).await?;

    Ok(Json(detail))
}

/// List a new hotel
#[utoipa::path(
    post,
    path = "/api/hotels",
    tag = "Hotels",
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an owner or admin")
    )
)]
pub async fn create_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateHotelRequest>,
) -> AppResult<(StatusCode, Json<HotelResponse>)> {
    let hotel = state
        .hotel_service
        .create(user.id, user.role, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(HotelResponse { hotel })))
}

/// Update a hotel
#[utoipa::path(
    put,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    params(("id" = Uuid, Path, description = "Hotel id")),
    request_body = UpdateHotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = HotelResponse),
        (status = 403, description = "Caller is not the owner or an admin"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn update_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateHotelRequest>,
) -> AppResult<Json<HotelResponse>> {
    let hotel = state
        .hotel_service
        .update(user.id, user.role, id, payload.into())
        .await?;

    Ok(Json(HotelResponse { hotel }))
}

/// Delete a hotel with its rooms and reviews
#[utoipa::path(
    delete,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    params(("id" = Uuid, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel deleted", body = MessageResponse),
        (status = 403, description = "Caller is not the owner or an admin"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn delete_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.hotel_service.delete(user.id, user.role, id).await?;

    Ok(Json(MessageResponse::new("Hotel deleted")))
}
