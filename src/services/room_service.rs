//! Room service - inventory under a hotel, gated by hotel ownership.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Room, RoomDraft, RoomPatch, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Room service trait for dependency injection.
#[async_trait]
pub trait RoomService: Send + Sync {
    /// Public room list for one hotel
    async fn list(&self, hotel_id: Uuid) -> AppResult<Vec<Room>>;

    /// Add a room to a hotel the caller owns (or as admin)
    async fn create(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        draft: RoomDraft,
    ) -> AppResult<Room>;

    /// Update a room via its hotel's ownership
    async fn update(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        id: Uuid,
        patch: RoomPatch,
    ) -> AppResult<Room>;

    /// Delete a room via its hotel's ownership
    async fn delete(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of RoomService using Unit of Work.
pub struct RoomManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RoomManager<U> {
    /// Create new room service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve a room's hotel and check the caller may manage it
    async fn ensure_hotel_access(
        &self,
        hotel_id: Uuid,
        actor_id: Uuid,
        actor_role: UserRole,
    ) -> AppResult<()> {
        let hotel = self
            .uow
            .hotels()
            .find_by_id(hotel_id)
            .await?
            .ok_or_not_found("Hotel")?;

        if hotel.owner_id != actor_id && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> RoomService for RoomManager<U> {
    async fn list(&self, hotel_id: Uuid) -> AppResult<Vec<Room>> {
        self.uow.rooms().list_by_hotel(hotel_id).await
    }

    async fn create(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        draft: RoomDraft,
    ) -> AppResult<Room> {
        self.ensure_hotel_access(draft.hotel_id, actor_id, actor_role)
            .await?;

        let room = Room::new(Uuid::new_v4(), draft);
        self.uow.rooms().create(room).await
    }

    async fn update(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        id: Uuid,
        patch: RoomPatch,
    ) -> AppResult<Room> {
        let mut room = self
            .uow
            .rooms()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Room")?;

        self.ensure_hotel_access(room.hotel_id, actor_id, actor_role)
            .await?;

        room.apply(patch);
        self.uow.rooms().update(room).await
    }

    async fn delete(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<()> {
        let room = self
            .uow
            .rooms()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Room")?;

        self.ensure_hotel_access(room.hotel_id, actor_id, actor_role)
            .await?;

        self.uow.rooms().delete(id).await
    }
}
