//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, booking_handler, hotel_handler, payment_handler, review_handler,
    room_handler,
};
use crate::domain::{
    Booking, BookingDetail, BookingFull, BookingStatus, Hotel, HotelSummary, HotelWithOwner,
    OwnerSummary, PaymentStatus, Review, ReviewWithAuthor, ReviewerSummary, Room, RoomSummary,
    UserResponse, UserRole, UserSummary,
};
use crate::infra::GatewayOrder;
use crate::services::{AdminStats, AuthResponse, HotelDetail, MonthlyRevenue};
use crate::types::{MessageResponse, PaginationMeta};

/// OpenAPI documentation for the StayFinder API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "StayFinder API",
        version = "0.1.0",
        description = "Hotel booking marketplace API with Axum, SeaORM, and clean architecture",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
        (url = "https://api.example.com", description = "Production server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        auth_handler::update_profile,
        // Hotel endpoints
        hotel_handler::search_hotels,
        hotel_handler::hotel_detail,
        hotel_handler::create_hotel,
        hotel_handler::update_hotel,
        hotel_handler::delete_hotel,
        // Room endpoints
        room_handler::list_rooms,
        room_handler::create_room,
        room_handler::update_room,
        room_handler::delete_room,
        // Booking endpoints
        booking_handler::list_bookings,
        booking_handler::create_booking,
        booking_handler::get_booking,
        booking_handler::cancel_booking,
        // Payment endpoints
        payment_handler::create_order,
        payment_handler::verify_payment,
        // Review endpoints
        review_handler::list_reviews,
        review_handler::create_review,
        review_handler::delete_review,
        // Admin endpoints
        admin_handler::stats,
        admin_handler::list_users,
        admin_handler::list_hotels,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            UserSummary,
            Hotel,
            HotelWithOwner,
            HotelSummary,
            OwnerSummary,
            Room,
            RoomSummary,
            Booking,
            BookingDetail,
            BookingFull,
            BookingStatus,
            PaymentStatus,
            Review,
            ReviewWithAuthor,
            ReviewerSummary,
            GatewayOrder,
            // Shared envelopes
            MessageResponse,
            PaginationMeta,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::UpdateProfileRequest,
            auth_handler::ProfileResponse,
            AuthResponse,
            // Hotel handler types
            hotel_handler::CreateHotelRequest,
            hotel_handler::UpdateHotelRequest,
            hotel_handler::HotelListResponse,
            hotel_handler::HotelResponse,
            HotelDetail,
            // Room handler types
            room_handler::CreateRoomRequest,
            room_handler::UpdateRoomRequest,
            room_handler::RoomListResponse,
            room_handler::RoomResponse,
            // Booking handler types
            booking_handler::CreateBookingRequest,
            booking_handler::BookingListResponse,
            booking_handler::BookingResponse,
            booking_handler::BookingFullResponse,
            // Payment handler types
            payment_handler::CreateOrderRequest,
            payment_handler::VerifyPaymentRequest,
            payment_handler::OrderResponse,
            payment_handler::VerifyPaymentResponse,
            // Review handler types
            review_handler::CreateReviewRequest,
            review_handler::ReviewListResponse,
            review_handler::ReviewResponse,
            // Admin handler types
            admin_handler::UserListResponse,
            admin_handler::AdminHotelListResponse,
            AdminStats,
            MonthlyRevenue,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and profile"),
        (name = "Hotels", description = "Hotel search and listing management"),
        (name = "Rooms", description = "Room inventory management"),
        (name = "Bookings", description = "Reservations and cancellation"),
        (name = "Payments", description = "Gateway orders and payment verification"),
        (name = "Reviews", description = "Guest reviews and ratings"),
        (name = "Admin", description = "Platform statistics and moderation")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
