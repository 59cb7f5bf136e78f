//! Review service - guest reviews and the hotel rating aggregate.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Review, ReviewWithAuthor, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Review service trait for dependency injection.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Public review list, optionally for one hotel, newest first
    async fn list(&self, hotel_id: Option<Uuid>) -> AppResult<Vec<ReviewWithAuthor>>;

    /// Add a review for a hotel; one per guest per hotel. The hotel's
    /// rating aggregates are refreshed in the same transaction.
    async fn create(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
        rating: i32,
        comment: String,
    ) -> AppResult<Review>;

    /// Remove a review as its author or an admin, refreshing the
    /// hotel's rating aggregates
    async fn delete(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ReviewService using Unit of Work.
pub struct ReviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReviewManager<U> {
    /// Create new review service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReviewService for ReviewManager<U> {
    async fn list(&self, hotel_id: Option<Uuid>) -> AppResult<Vec<ReviewWithAuthor>> {
        self.uow.reviews().list_with_authors(hotel_id).await
    }

    async fn create(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
        rating: i32,
        comment: String,
    ) -> AppResult<Review> {
        self.uow
            .hotels()
            .find_by_id(hotel_id)
            .await?
            .ok_or_not_found("Hotel")?;

        let review = Review::new(Uuid::new_v4(), user_id, hotel_id, rating, comment)?;
        self.uow.reviews().create_and_rescore(review).await
    }

    async fn delete(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<()> {
        let review = self
            .uow
            .reviews()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Review")?;

        if review.user_id != actor_id && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.uow.reviews().delete_and_rescore(id).await
    }
}
