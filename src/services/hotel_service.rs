//! Hotel catalogue service - public search, detail assembly and
//! ownership-gated mutations.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Hotel, HotelDraft, HotelFilters, HotelPatch, HotelWithOwner, ReviewWithAuthor, Room, UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// A hotel page: the hotel with its rooms and reviews attached
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelDetail {
    pub hotel: HotelWithOwner,
    pub rooms: Vec<Room>,
    pub reviews: Vec<ReviewWithAuthor>,
}

/// Hotel catalogue service trait for dependency injection.
#[async_trait]
pub trait HotelService: Send + Sync {
    /// Public filtered search, newest first
    async fn search(
        &self,
        filters: HotelFilters,
        page: PaginationParams,
    ) -> AppResult<Paginated<HotelWithOwner>>;

    /// One hotel with owner contact, rooms and reviews
    async fn detail(&self, id: Uuid) -> AppResult<HotelDetail>;

    /// Create a hotel stamped with the caller as owner; owner or
    /// admin role required
    async fn create(
        &self,
        owner_id: Uuid,
        actor_role: UserRole,
        draft: HotelDraft,
    ) -> AppResult<Hotel>;

    /// Update a hotel as its owner or an admin
    async fn update(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        id: Uuid,
        patch: HotelPatch,
    ) -> AppResult<Hotel>;

    /// Delete a hotel with its rooms and reviews, as owner or admin
    async fn delete(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of HotelService using Unit of Work.
pub struct HotelCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> HotelCatalog<U> {
    /// Create new hotel service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> HotelService for HotelCatalog<U> {
    async fn search(
        &self,
        filters: HotelFilters,
        page: PaginationParams,
    ) -> AppResult<Paginated<HotelWithOwner>> {
        let (hotels, total) = self.uow.hotels().search(filters, page.clone()).await?;

        Ok(Paginated::new(hotels, total, page.page, page.limit()))
    }

    async fn detail(&self, id: Uuid) -> AppResult<HotelDetail> {
        let hotel = self
            .uow
            .hotels()
            .find_with_owner(id)
            .await?
            .ok_or_not_found("Hotel")?;

        let rooms = self.uow.rooms().list_by_hotel(id).await?;
        let reviews = self.uow.reviews().list_with_authors(Some(id)).await?;

        Ok(HotelDetail {
            hotel,
            rooms,
            reviews,
        })
    }

    async fn create(
        &self,
        owner_id: Uuid,
        actor_role: UserRole,
        draft: HotelDraft,
    ) -> AppResult<Hotel> {
        if !actor_role.is_owner() && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        let hotel = Hotel::new(Uuid::new_v4(), owner_id, draft);
        self.uow.hotels().create(hotel).await
    }

    async fn update(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        id: Uuid,
        patch: HotelPatch,
    ) -> AppResult<Hotel> {
        let mut hotel = self
            .uow
            .hotels()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Hotel")?;

        if hotel.owner_id != actor_id && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        // Approval is a moderation decision
        if patch.is_approved.is_some() && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        hotel.apply(patch);
        self.uow.hotels().update(hotel).await
    }

    async fn delete(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<()> {
        let hotel = self
            .uow
            .hotels()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Hotel")?;

        if hotel.owner_id != actor_id && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.uow.hotels().delete_cascade(id).await
    }
}
