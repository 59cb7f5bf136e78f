//! Review repository implementation.
//!
//! Review writes run inside a serializable transaction so the stored
//! hotel rating always reflects the surviving review rows, even under
//! concurrent submissions.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::review::{self, ActiveModel, Entity as ReviewEntity};
use super::entities::{hotel, user};
use crate::domain::{aggregate_rating, Hotel, Review, ReviewWithAuthor, ReviewerSummary};
use crate::errors::{AppError, AppResult};
use crate::infra::unit_of_work::run_in_txn;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Review repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find review by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>>;

    /// Reviews, optionally restricted to one hotel, newest first,
    /// with author summaries attached
    async fn list_with_authors(&self, hotel_id: Option<Uuid>) -> AppResult<Vec<ReviewWithAuthor>>;

    /// Insert a review and refresh the hotel's rating aggregates in
    /// one transaction. Rejects a second review by the same author.
    async fn create_and_rescore(&self, review: Review) -> AppResult<Review>;

    /// Delete a review and refresh the hotel's rating aggregates in
    /// one transaction.
    async fn delete_and_rescore(&self, id: Uuid) -> AppResult<()>;

    /// Remove every review (seeding)
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of ReviewRepository
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Recompute and persist the rating aggregates of one hotel from its
/// current review rows. Must run on the same transaction as the write
/// that invalidated them.
async fn rescore_hotel<C: ConnectionTrait>(conn: &C, hotel_id: Uuid) -> AppResult<()> {
    let ratings: Vec<i32> = ReviewEntity::find()
        .select_only()
        .column(review::Column::Rating)
        .filter(review::Column::HotelId.eq(hotel_id))
        .into_tuple()
        .all(conn)
        .await?;

    let (rating, total_reviews) = aggregate_rating(&ratings);

    let Some(model) = hotel::Entity::find_by_id(hotel_id).one(conn).await? else {
        return Err(AppError::NotFound("Hotel"));
    };

    let mut updated = Hotel::from(model);
    updated.set_rating(rating, total_reviews);
    hotel::ActiveModel::from(&updated).update(conn).await?;

    Ok(())
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Review::from))
    }

    async fn list_with_authors(&self, hotel_id: Option<Uuid>) -> AppResult<Vec<ReviewWithAuthor>> {
        let mut query = ReviewEntity::find();

        if let Some(hotel_id) = hotel_id {
            query = query.filter(review::Column::HotelId.eq(hotel_id));
        }

        let rows = query
            .find_also_related(user::Entity)
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(model, author)| ReviewWithAuthor {
                review: Review::from(model),
                user: author.map(|u| ReviewerSummary {
                    id: u.id,
                    name: u.name,
                    profile_image: u.profile_image,
                }),
            })
            .collect())
    }

    async fn create_and_rescore(&self, review: Review) -> AppResult<Review> {
        run_in_txn(&self.db, IsolationLevel::Serializable, move |txn| {
            Box::pin(async move {
                let already_reviewed = ReviewEntity::find()
                    .filter(review::Column::UserId.eq(review.user_id))
                    .filter(review::Column::HotelId.eq(review.hotel_id))
                    .one(txn)
                    .await?
                    .is_some();

                if already_reviewed {
                    return Err(AppError::DuplicateReview);
                }

                let inserted = ActiveModel::from(&review).insert(txn).await?;
                rescore_hotel(txn, review.hotel_id).await?;

                Ok(Review::from(inserted))
            })
        })
        .await
    }

    async fn delete_and_rescore(&self, id: Uuid) -> AppResult<()> {
        run_in_txn(&self.db, IsolationLevel::Serializable, move |txn| {
            Box::pin(async move {
                let Some(model) = ReviewEntity::find_by_id(id).one(txn).await? else {
                    return Err(AppError::NotFound("Review"));
                };
                let hotel_id = model.hotel_id;

                ReviewEntity::delete_by_id(id).exec(txn).await?;
                rescore_hotel(txn, hotel_id).await?;

                Ok(())
            })
        })
        .await
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = ReviewEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
