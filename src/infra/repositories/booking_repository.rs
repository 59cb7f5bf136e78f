//! Booking repository implementation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::booking::{self, ActiveModel, Entity as BookingEntity};
use super::entities::{hotel, room, user};
use crate::domain::{
    Booking, BookingDetail, BookingFull, BookingScope, Hotel, HotelSummary, PaymentStatus, Room,
    RoomSummary, User, UserSummary,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Creation time and amount of a paid booking, for revenue aggregation.
#[derive(Debug, Clone, FromQueryResult)]
pub struct PaidBooking {
    pub created_at: DateTime<Utc>,
    pub total_amount: i64,
}

/// Booking repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Find booking by ID with the full hotel and room records attached
    async fn find_full(&self, id: Uuid) -> AppResult<Option<BookingFull>>;

    /// Persist a new booking
    async fn create(&self, booking: Booking) -> AppResult<Booking>;

    /// Persist every field of an existing booking
    async fn update(&self, booking: Booking) -> AppResult<Booking>;

    /// Bookings visible inside the given scope, newest first, with
    /// hotel, room and guest summaries attached
    async fn list_detailed(&self, scope: BookingScope) -> AppResult<Vec<BookingDetail>>;

    /// The most recently created bookings across all hotels
    async fn recent_detailed(&self, limit: u64) -> AppResult<Vec<BookingDetail>>;

    /// Count all bookings
    async fn count(&self) -> AppResult<u64>;

    /// Creation time and amount of every paid booking
    async fn paid_summaries(&self) -> AppResult<Vec<PaidBooking>>;

    /// Remove every booking (seeding)
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of BookingRepository
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Batch-load the hotels, rooms and guests referenced by the given
    /// bookings and zip them into detail rows, preserving order.
    async fn attach_summaries(&self, models: Vec<booking::Model>) -> AppResult<Vec<BookingDetail>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let hotel_ids = distinct(models.iter().map(|b| b.hotel_id));
        let room_ids = distinct(models.iter().map(|b| b.room_id));
        let user_ids = distinct(models.iter().map(|b| b.user_id));

        let hotels: HashMap<Uuid, HotelSummary> = hotel::Entity::find()
            .filter(hotel::Column::Id.is_in(hotel_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| {
                let h = Hotel::from(m);
                (h.id, HotelSummary::from(&h))
            })
            .collect();

        let rooms: HashMap<Uuid, RoomSummary> = room::Entity::find()
            .filter(room::Column::Id.is_in(room_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| {
                let r = Room::from(m);
                (r.id, RoomSummary::from(&r))
            })
            .collect();

        let users: HashMap<Uuid, UserSummary> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| {
                let u = User::from(m);
                (u.id, UserSummary::from(&u))
            })
            .collect();

        let details = models
            .into_iter()
            .map(|model| {
                let booking = Booking::from(model);
                let hotel = hotels.get(&booking.hotel_id).cloned();
                let room = rooms.get(&booking.room_id).cloned();
                let user = users.get(&booking.user_id).cloned();
                BookingDetail {
                    booking,
                    hotel,
                    room,
                    user,
                }
            })
            .collect();

        Ok(details)
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let result = BookingEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Booking::from))
    }

    async fn find_full(&self, id: Uuid) -> AppResult<Option<BookingFull>> {
        let Some(model) = BookingEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let booking = Booking::from(model);

        let hotel = hotel::Entity::find_by_id(booking.hotel_id)
            .one(&self.db)
            .await?
            .map(Hotel::from);
        let room = room::Entity::find_by_id(booking.room_id)
            .one(&self.db)
            .await?
            .map(Room::from);
        let user = user::Entity::find_by_id(booking.user_id)
            .one(&self.db)
            .await?
            .map(|m| UserSummary::from(&User::from(m)));

        Ok(Some(BookingFull {
            booking,
            hotel,
            room,
            user,
        }))
    }

    async fn create(&self, booking: Booking) -> AppResult<Booking> {
        let model = ActiveModel::from(&booking)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Booking::from(model))
    }

    async fn update(&self, booking: Booking) -> AppResult<Booking> {
        let model = ActiveModel::from(&booking)
            .update(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Booking::from(model))
    }

    async fn list_detailed(&self, scope: BookingScope) -> AppResult<Vec<BookingDetail>> {
        let mut query = BookingEntity::find();

        match scope {
            BookingScope::All => {}
            BookingScope::ForUser(user_id) => {
                query = query.filter(booking::Column::UserId.eq(user_id));
            }
            BookingScope::ForHotel(hotel_id) => {
                query = query.filter(booking::Column::HotelId.eq(hotel_id));
            }
            BookingScope::ForHotels(hotel_ids) => {
                if hotel_ids.is_empty() {
                    return Ok(Vec::new());
                }
                query = query.filter(booking::Column::HotelId.is_in(hotel_ids));
            }
        }

        let models = query
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.attach_summaries(models).await
    }

    async fn recent_detailed(&self, limit: u64) -> AppResult<Vec<BookingDetail>> {
        let models = BookingEntity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.attach_summaries(models).await
    }

    async fn count(&self) -> AppResult<u64> {
        BookingEntity::find().count(&self.db).await.map_err(AppError::from)
    }

    async fn paid_summaries(&self) -> AppResult<Vec<PaidBooking>> {
        BookingEntity::find()
            .select_only()
            .column(booking::Column::CreatedAt)
            .column(booking::Column::TotalAmount)
            .filter(booking::Column::PaymentStatus.eq(PaymentStatus::Paid.to_string()))
            .into_model::<PaidBooking>()
            .all(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = BookingEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
