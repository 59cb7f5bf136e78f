//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Payment gateway client
//! - Unit of Work for transaction management

pub mod db;
pub mod payments;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use payments::{GatewayOrder, PaymentGateway, RazorpayGateway};
pub use repositories::{
    BookingRepository, BookingStore, HotelRepository, HotelStore, PaidBooking, ReviewRepository,
    ReviewStore, RoomRepository, RoomStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use payments::MockPaymentGateway;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockBookingRepository, MockHotelRepository, MockReviewRepository, MockRoomRepository,
    MockUserRepository,
};
