//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access; multi-statement writes run inside repository transactions.

mod auth_service;
mod booking_service;
pub mod container;
mod hotel_service;
mod payment_service;
mod review_service;
mod room_service;
mod stats_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims};
pub use booking_service::{BookingManager, BookingService};
pub use hotel_service::{HotelCatalog, HotelDetail, HotelService};
pub use payment_service::{PaymentProcessor, PaymentService};
pub use review_service::{ReviewManager, ReviewService};
pub use room_service::{RoomManager, RoomService};
pub use stats_service::{AdminStats, MonthlyRevenue, StatsCollector, StatsService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
