//! Admin handlers - platform statistics and moderation listings.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{HotelWithOwner, UserResponse};
use crate::errors::AppResult;
use crate::services::AdminStats;
use crate::types::{PaginationMeta, PaginationParams};

/// Paginated user listing
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub data: Vec<UserResponse>,
    pub pagination: PaginationMeta,
}

/// Paginated hotel listing with owners
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminHotelListResponse {
    pub data: Vec<HotelWithOwner>,
    pub pagination: PaginationMeta,
}

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(stats))
        .route("/admin/users", get(list_users))
        .route("/admin/hotels", get(list_hotels))
}

/// Platform statistics
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Counts, revenue and recent bookings", body = AdminStats),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AdminStats>> {
    require_admin(&user)?;

    let stats = state.stats_service.overview().await?;

    Ok(Json(stats))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    params(PaginationParams),
    responses(
        (status = 200, description = "Users, newest first", body = UserListResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<UserListResponse>> {
    require_admin(&user)?;

    let result = state.stats_service.list_users(page).await?;

    Ok(Json(UserListResponse {
        data: result.data,
        pagination: result.pagination,
    }))
}

/// List all hotels with their owners
#[utoipa::path(
    get,
    path = "/api/admin/hotels",
    tag = "Admin",
    params(PaginationParams),
    responses(
        (status = 200, description = "Hotels, newest first", body = AdminHotelListResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_hotels(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<AdminHotelListResponse>> {
    require_admin(&user)?;

    let result = state.stats_service.list_hotels(page).await?;

    Ok(Json(AdminHotelListResponse {
        data: result.data,
        pagination: result.pagination,
    }))
}
