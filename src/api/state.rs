//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and the
//! database connection the health probe pings.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, BookingService, HotelService, PaymentService, ReviewService, RoomService,
    ServiceContainer, Services, StatsService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Hotel catalogue service
    pub hotel_service: Arc<dyn HotelService>,
    /// Room service
    pub room_service: Arc<dyn RoomService>,
    /// Booking service
    pub booking_service: Arc<dyn BookingService>,
    /// Payment service
    pub payment_service: Arc<dyn PaymentService>,
    /// Review service
    pub review_service: Arc<dyn ReviewService>,
    /// Analytics service
    pub stats_service: Arc<dyn StatsService>,
    /// Database connection, for the health probe
    pub db: DatabaseConnection,
}

impl AppState {
    /// Create application state from a connected database and config.
    ///
    /// This is the recommended way to create AppState as it wires
    /// every service through the ServiceContainer.
    pub fn from_config(database: &Database, config: Config) -> Self {
        let db = database.get_connection();
        let container = Services::from_connection(db.clone(), config);

        Self {
            auth_service: container.auth(),
            hotel_service: container.hotels(),
            room_service: container.rooms(),
            booking_service: container.bookings(),
            payment_service: container.payments(),
            review_service: container.reviews(),
            stats_service: container.stats(),
            db,
        }
    }

    /// Create application state with manually injected services
    /// (tests inject stubs here; `db` may be a disconnected handle)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        hotel_service: Arc<dyn HotelService>,
        room_service: Arc<dyn RoomService>,
        booking_service: Arc<dyn BookingService>,
        payment_service: Arc<dyn PaymentService>,
        review_service: Arc<dyn ReviewService>,
        stats_service: Arc<dyn StatsService>,
        db: DatabaseConnection,
    ) -> Self {
        Self {
            auth_service,
            hotel_service,
            room_service,
            booking_service,
            payment_service,
            review_service,
            stats_service,
            db,
        }
    }
}
