//! Review handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Review, ReviewWithAuthor};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Review list query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReviewQuery {
    /// Narrow the list to one hotel
    pub hotel_id: Option<Uuid>,
}

/// Review list payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewWithAuthor>,
}

/// Single review payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub review: Review,
}

/// New review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub hotel_id: Uuid,
    /// Star rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "Rating must be 1-5"))]
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating: i32,
    #[validate(length(min = 1, message = "Comment is required"))]
    #[schema(example = "Lovely stay, great staff.")]
    pub comment: String,
}

/// Create public review routes
pub fn review_public_routes() -> Router<AppState> {
    Router::new().route("/reviews", get(list_reviews))
}

/// Create authenticated review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(create_review))
        .route("/reviews/:id", delete(delete_review))
}

/// List reviews
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    params(ReviewQuery),
    responses(
        (status = 200, description = "Reviews, newest first", body = ReviewListResponse)
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> AppResult<Json<ReviewListResponse>> {
    let reviews = state.review_service.list(query.hotel_id).await?;

    Ok(Json(ReviewListResponse { reviews }))
}

/// Review a hotel
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid rating or hotel already reviewed"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    let review = state
        .review_service
        .create(user.id, payload.hotel_id, payload.rating, payload.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(ReviewResponse { review })))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 403, description = "Not the author or an admin"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.review_service.delete(user.id, user.role, id).await?;

    Ok(Json(MessageResponse::new("Review deleted")))
}
