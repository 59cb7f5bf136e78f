//! Unit of Work - centralized repository access.
//!
//! Services reach the database exclusively through this trait, so tests can
//! substitute in-memory repositories. Multi-step writes that must be atomic
//! (review scoring, hotel cascade delete) live inside the stores and share
//! the transaction runner below.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};

use super::repositories::{
    BookingRepository, BookingStore, HotelRepository, HotelStore, ReviewRepository, ReviewStore,
    RoomRepository, RoomStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Repository access for the application services.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get hotel repository
    fn hotels(&self) -> Arc<dyn HotelRepository>;

    /// Get room repository
    fn rooms(&self) -> Arc<dyn RoomRepository>;

    /// Get booking repository
    fn bookings(&self) -> Arc<dyn BookingRepository>;

    /// Get review repository
    fn reviews(&self) -> Arc<dyn ReviewRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores.
pub struct Persistence {
    user_repo: Arc<UserStore>,
    hotel_repo: Arc<HotelStore>,
    room_repo: Arc<RoomStore>,
    booking_repo: Arc<BookingStore>,
    review_repo: Arc<ReviewStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            hotel_repo: Arc::new(HotelStore::new(db.clone())),
            room_repo: Arc::new(RoomStore::new(db.clone())),
            booking_repo: Arc::new(BookingStore::new(db.clone())),
            review_repo: Arc::new(ReviewStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn hotels(&self) -> Arc<dyn HotelRepository> {
        self.hotel_repo.clone()
    }

    fn rooms(&self) -> Arc<dyn RoomRepository> {
        self.room_repo.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.booking_repo.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.review_repo.clone()
    }
}

/// Execute a closure within a database transaction.
///
/// The transaction is committed on success and rolled back on error; a failed
/// rollback is logged and the original error is returned.
pub(crate) async fn run_in_txn<T, F>(
    db: &DatabaseConnection,
    isolation: IsolationLevel,
    f: F,
) -> AppResult<T>
where
    F: for<'a> FnOnce(
            &'a DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>
        + Send,
    T: Send,
{
    let txn = db
        .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
        .await
        .map_err(AppError::from)?;

    match f(&txn).await {
        Ok(result) => {
            txn.commit().await.map_err(AppError::from)?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}
