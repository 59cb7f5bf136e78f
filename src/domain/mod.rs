//! Domain layer - Core business entities and logic
//!
//! Core domain models that represent business concepts independent of
//! infrastructure concerns: entities, value objects, and the booking
//! state machine.

pub mod booking;
pub mod hotel;
pub mod password;
pub mod review;
pub mod room;
pub mod user;

pub use booking::{
    booking_scope, nights, Booking, BookingDetail, BookingFull, BookingScope, BookingStatus,
    PaymentStatus,
};
pub use hotel::{
    Hotel, HotelDraft, HotelFilters, HotelPatch, HotelSummary, HotelWithOwner, OwnerSummary,
};
pub use password::Password;
pub use review::{aggregate_rating, Review, ReviewWithAuthor, ReviewerSummary};
pub use room::{Room, RoomDraft, RoomPatch, RoomSummary};
pub use user::{User, UserResponse, UserRole, UserSummary};
