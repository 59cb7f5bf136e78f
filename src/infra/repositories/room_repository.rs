//! Room repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::room::{self, ActiveModel, Entity as RoomEntity};
use crate::domain::Room;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Room repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>>;

    /// All rooms of a hotel, oldest first
    async fn list_by_hotel(&self, hotel_id: Uuid) -> AppResult<Vec<Room>>;

    /// Persist a new room
    async fn create(&self, room: Room) -> AppResult<Room>;

    /// Persist every field of an existing room
    async fn update(&self, room: Room) -> AppResult<Room>;

    /// Delete a room
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Remove every room (seeding)
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of RoomRepository
pub struct RoomStore {
    db: DatabaseConnection,
}

impl RoomStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoomRepository for RoomStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        let result = RoomEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Room::from))
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> AppResult<Vec<Room>> {
        let models = RoomEntity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .order_by_asc(room::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Room::from).collect())
    }

    async fn create(&self, room: Room) -> AppResult<Room> {
        let model = ActiveModel::from(&room)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Room::from(model))
    }

    async fn update(&self, room: Room) -> AppResult<Room> {
        let model = ActiveModel::from(&room)
            .update(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Room::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = RoomEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Room"));
        }

        Ok(())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = RoomEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
