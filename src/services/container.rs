//! Service container - centralized construction and access for the
//! application services.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, BookingManager, BookingService, HotelCatalog, HotelService,
    PaymentProcessor, PaymentService, ReviewManager, ReviewService, RoomManager, RoomService,
    StatsCollector, StatsService,
};
use crate::config::Config;
use crate::infra::{PaymentGateway, Persistence, RazorpayGateway};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get hotel catalogue service
    fn hotels(&self) -> Arc<dyn HotelService>;

    /// Get room service
    fn rooms(&self) -> Arc<dyn RoomService>;

    /// Get booking service
    fn bookings(&self) -> Arc<dyn BookingService>;

    /// Get payment service
    fn payments(&self) -> Arc<dyn PaymentService>;

    /// Get review service
    fn reviews(&self) -> Arc<dyn ReviewService>;

    /// Get analytics service
    fn stats(&self) -> Arc<dyn StatsService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    hotel_service: Arc<dyn HotelService>,
    room_service: Arc<dyn RoomService>,
    booking_service: Arc<dyn BookingService>,
    payment_service: Arc<dyn PaymentService>,
    review_service: Arc<dyn ReviewService>,
    stats_service: Arc<dyn StatsService>,
}

impl Services {
    /// Create service container from a database connection and config,
    /// talking to the real payment gateway
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let gateway: Arc<dyn PaymentGateway> = Arc::new(RazorpayGateway::new(
            config.razorpay_key_id.clone(),
            config.razorpay_secret().to_string(),
        ));

        Self::with_gateway(db, config, gateway)
    }

    /// Same wiring with a caller-supplied gateway client (tests use a
    /// stub instead of the REST client)
    pub fn with_gateway(
        db: sea_orm::DatabaseConnection,
        config: Config,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let gateway_secret = config.razorpay_secret().to_string();

        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let hotel_service = Arc::new(HotelCatalog::new(uow.clone()));
        let room_service = Arc::new(RoomManager::new(uow.clone()));
        let booking_service = Arc::new(BookingManager::new(uow.clone()));
        let payment_service = Arc::new(PaymentProcessor::new(
            uow.clone(),
            gateway,
            gateway_secret,
        ));
        let review_service = Arc::new(ReviewManager::new(uow.clone()));
        let stats_service = Arc::new(StatsCollector::new(uow));

        Self {
            auth_service,
            hotel_service,
            room_service,
            booking_service,
            payment_service,
            review_service,
            stats_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn hotels(&self) -> Arc<dyn HotelService> {
        self.hotel_service.clone()
    }

    fn rooms(&self) -> Arc<dyn RoomService> {
        self.room_service.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentService> {
        self.payment_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn stats(&self) -> Arc<dyn StatsService> {
        self.stats_service.clone()
    }
}
