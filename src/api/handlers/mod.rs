//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod booking_handler;
pub mod hotel_handler;
pub mod payment_handler;
pub mod review_handler;
pub mod room_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::{auth_routes, profile_routes};
pub use booking_handler::booking_routes;
pub use hotel_handler::{hotel_public_routes, hotel_routes};
pub use payment_handler::payment_routes;
pub use review_handler::{review_public_routes, review_routes};
pub use room_handler::{room_public_routes, room_routes};
