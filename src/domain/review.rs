//! Review domain entity and rating aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{MAX_RATING, MIN_RATING};
use crate::errors::{AppError, AppResult};

/// Review domain entity. At most one per (user, hotel).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    /// Whole-star rating, 1 to 5
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review.
    ///
    /// # Errors
    /// Returns validation error when the rating is outside 1..=5.
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        hotel_id: Uuid,
        rating: i32,
        comment: String,
    ) -> AppResult<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            user_id,
            hotel_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Fold a hotel's review ratings into its stored aggregates:
/// mean rounded to one decimal, plus the review count. An empty slice
/// resets the hotel to unrated.
pub fn aggregate_rating(ratings: &[i32]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    let mean = sum as f64 / ratings.len() as f64;
    ((mean * 10.0).round() / 10.0, ratings.len() as i32)
}

/// Reviewer details denormalized into review listings
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Review with its author attached
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ReviewerSummary>,
}
