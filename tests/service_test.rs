//! Service layer tests over mocked repositories.
//!
//! Each test wires a real service implementation to mockall
//! repositories through the Unit of Work, so no database or payment
//! gateway is needed.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use stayfinder::config::Config;
use stayfinder::domain::{
    Booking, BookingFull, BookingScope, BookingStatus, Hotel, HotelDraft, HotelFilters,
    HotelPatch, HotelWithOwner, Password, PaymentStatus, Review, Room, RoomDraft, RoomPatch,
    User, UserRole,
};
use stayfinder::errors::AppError;
use stayfinder::infra::payments::compute_signature;
use stayfinder::infra::{
    BookingRepository, GatewayOrder, HotelRepository, MockBookingRepository, MockHotelRepository,
    MockPaymentGateway, MockReviewRepository, MockRoomRepository, MockUserRepository, PaidBooking,
    PaymentGateway, ReviewRepository, RoomRepository, UnitOfWork, UserRepository,
};
use stayfinder::services::{
    AuthService, Authenticator, BookingManager, BookingService, HotelCatalog, HotelService,
    PaymentProcessor, PaymentService, ReviewManager, ReviewService, RoomManager, RoomService,
    StatsCollector, StatsService,
};
use stayfinder::types::PaginationParams;

const GATEWAY_SECRET: &str = "rzp_test_secret_abc";

// =============================================================================
// Test fixtures
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_user(id: Uuid, role: UserRole) -> User {
    User::new(
        id,
        "Test User".to_string(),
        "test@example.com".to_string(),
        "unused-hash".to_string(),
        role,
        "+91 9000000000".to_string(),
    )
}

fn hotel_draft() -> HotelDraft {
    HotelDraft {
        name: "Test Palace".to_string(),
        description: "Courtyard hotel near the fort".to_string(),
        city: "Jaipur".to_string(),
        state: "Rajasthan".to_string(),
        address: "1 Fort Road".to_string(),
        price_per_night: 5000,
        amenities: vec!["WiFi".to_string()],
        images: vec![],
    }
}

fn test_hotel(id: Uuid, owner_id: Uuid) -> Hotel {
    Hotel::new(id, owner_id, hotel_draft())
}

fn test_room(id: Uuid, hotel_id: Uuid, price: i64) -> Room {
    Room::new(
        id,
        RoomDraft {
            hotel_id,
            room_type: "Deluxe".to_string(),
            price,
            capacity: 2,
            description: "Deluxe room".to_string(),
            images: vec![],
        },
    )
}

/// A fresh booking in the initial (pending, confirmed) state
fn test_booking(user_id: Uuid) -> Booking {
    Booking::new(
        Uuid::new_v4(),
        user_id,
        Uuid::new_v4(),
        Uuid::new_v4(),
        date(2025, 3, 10),
        date(2025, 3, 12),
        10_000,
    )
}

fn paid_booking(user_id: Uuid) -> Booking {
    let mut booking = test_booking(user_id);
    booking
        .mark_paid("order_live_1".to_string(), "pay_live_1".to_string())
        .unwrap();
    booking
}

/// A pending booking already bound to a gateway order
fn bound_booking(user_id: Uuid, order_id: &str) -> Booking {
    let mut booking = test_booking(user_id);
    booking.attach_order(order_id.to_string()).unwrap();
    booking
}

/// Test mock for UnitOfWork wrapping one mockall repository per store.
/// Tests configure only the repositories their service actually touches;
/// an unexpected call on any other repository fails the test.
struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    hotels: Arc<MockHotelRepository>,
    rooms: Arc<MockRoomRepository>,
    bookings: Arc<MockBookingRepository>,
    reviews: Arc<MockReviewRepository>,
}

impl TestUnitOfWork {
    fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            hotels: Arc::new(MockHotelRepository::new()),
            rooms: Arc::new(MockRoomRepository::new()),
            bookings: Arc::new(MockBookingRepository::new()),
            reviews: Arc::new(MockReviewRepository::new()),
        }
    }

    fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    fn with_hotels(mut self, repo: MockHotelRepository) -> Self {
        self.hotels = Arc::new(repo);
        self
    }

    fn with_rooms(mut self, repo: MockRoomRepository) -> Self {
        self.rooms = Arc::new(repo);
        self
    }

    fn with_bookings(mut self, repo: MockBookingRepository) -> Self {
        self.bookings = Arc::new(repo);
        self
    }

    fn with_reviews(mut self, repo: MockReviewRepository) -> Self {
        self.reviews = Arc::new(repo);
        self
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn hotels(&self) -> Arc<dyn HotelRepository> {
        self.hotels.clone()
    }

    fn rooms(&self) -> Arc<dyn RoomRepository> {
        self.rooms.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.bookings.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }
}

fn auth_service(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
    let uow = TestUnitOfWork::new().with_users(users);
    Authenticator::new(Arc::new(uow), Config::from_env())
}

// =============================================================================
// Auth service
// =============================================================================

#[tokio::test]
async fn test_register_issues_a_verifiable_token() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .withf(|email| email == "priya@example.com")
        .returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|u| {
            u.email == "priya@example.com"
                && u.role == UserRole::Customer
                && u.password_hash.starts_with("$argon2")
        })
        .returning(|u| Ok(u));

    let service = auth_service(users);

    let auth = service
        .register(
            "Priya".to_string(),
            "Priya@Example.com".to_string(),
            "secret123".to_string(),
            "+91 9000000001".to_string(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(auth.user.email, "priya@example.com");
    assert_eq!(auth.user.role, "customer");

    let claims = service.verify_token(&auth.token).unwrap();
    assert_eq!(claims.sub, auth.user.id);
    assert_eq!(claims.role, "customer");
}

#[tokio::test]
async fn test_register_rejects_a_duplicate_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user(Uuid::new_v4(), UserRole::Customer))));

    let service = auth_service(users);

    let result = service
        .register(
            "Priya".to_string(),
            "test@example.com".to_string(),
            "secret123".to_string(),
            "+91 9000000001".to_string(),
            None,
        )
        .await;

    match result.unwrap_err() {
        AppError::Validation(msg) => assert_eq!(msg, "Email already registered"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_register_refuses_the_admin_role() {
    let service = auth_service(MockUserRepository::new());

    let result = service
        .register(
            "Mallory".to_string(),
            "mallory@example.com".to_string(),
            "secret123".to_string(),
            "+91 9000000002".to_string(),
            Some("admin".to_string()),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_owners_can_self_register() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|u| u.role == UserRole::Owner)
        .returning(|u| Ok(u));

    let service = auth_service(users);

    let auth = service
        .register(
            "Rajesh".to_string(),
            "rajesh@example.com".to_string(),
            "secret123".to_string(),
            "+91 9000000003".to_string(),
            Some("owner".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(auth.user.role, "owner");
}

#[tokio::test]
async fn test_login_checks_the_password() {
    let mut user = test_user(Uuid::new_v4(), UserRole::Owner);
    user.password_hash = Password::new("owner123").unwrap().into_string();
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    let found = user.clone();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(found.clone())));

    let service = auth_service(users);

    let auth = service
        .login("test@example.com".to_string(), "owner123".to_string())
        .await
        .unwrap();
    assert_eq!(auth.user.id, user_id);

    let wrong = service
        .login("test@example.com".to_string(), "not-it".to_string())
        .await;
    assert!(matches!(wrong.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_does_not_reveal_unknown_emails() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let service = auth_service(users);

    let result = service
        .login("ghost@example.com".to_string(), "whatever1".to_string())
        .await;

    // Same error as a wrong password, so emails cannot be enumerated
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_profile_updates_keep_email_and_role() {
    let user = test_user(Uuid::new_v4(), UserRole::Customer);
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    let found = user.clone();
    users
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(move |_| Ok(Some(found.clone())));
    users
        .expect_update()
        .withf(|u| u.name == "New Name" && u.email == "test@example.com")
        .returning(|u| Ok(u));

    let service = auth_service(users);

    let updated = service
        .update_profile(
            user_id,
            Some("New Name".to_string()),
            None,
            Some("https://img.example.com/me.png".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.role, UserRole::Customer);
    assert_eq!(
        updated.profile_image.as_deref(),
        Some("https://img.example.com/me.png")
    );
}

// =============================================================================
// Hotel service
// =============================================================================

#[tokio::test]
async fn test_search_wraps_results_in_a_page_envelope() {
    let rows = vec![HotelWithOwner {
        hotel: test_hotel(Uuid::new_v4(), Uuid::new_v4()),
        owner: None,
    }];

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_search()
        .returning(move |_, _| Ok((rows.clone(), 12)));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = HotelCatalog::new(Arc::new(uow));

    let page = service
        .search(HotelFilters::default(), PaginationParams::new(1, 9))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.total, 12);
    assert_eq!(page.pagination.pages, 2);
    assert_eq!(page.pagination.limit, 9);
}

#[tokio::test]
async fn test_hotel_detail_assembles_rooms_and_reviews() {
    let hotel_id = Uuid::new_v4();

    let mut hotels = MockHotelRepository::new();
    let with_owner = HotelWithOwner {
        hotel: test_hotel(hotel_id, Uuid::new_v4()),
        owner: None,
    };
    hotels
        .expect_find_with_owner()
        .with(eq(hotel_id))
        .returning(move |_| Ok(Some(with_owner.clone())));

    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_list_by_hotel()
        .with(eq(hotel_id))
        .returning(|id| Ok(vec![test_room(Uuid::new_v4(), id, 5000)]));

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_list_with_authors()
        .with(eq(Some(hotel_id)))
        .returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork::new()
        .with_hotels(hotels)
        .with_rooms(rooms)
        .with_reviews(reviews);
    let service = HotelCatalog::new(Arc::new(uow));

    let detail = service.detail(hotel_id).await.unwrap();
    assert_eq!(detail.hotel.hotel.id, hotel_id);
    assert_eq!(detail.rooms.len(), 1);
    assert!(detail.reviews.is_empty());
}

#[tokio::test]
async fn test_customers_cannot_create_hotels() {
    let uow = TestUnitOfWork::new();
    let service = HotelCatalog::new(Arc::new(uow));

    let result = service
        .create(Uuid::new_v4(), UserRole::Customer, hotel_draft())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_new_hotels_are_stamped_with_their_owner() {
    let owner = Uuid::new_v4();

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_create()
        .withf(move |h| h.owner_id == owner && h.is_approved)
        .returning(|h| Ok(h));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = HotelCatalog::new(Arc::new(uow));

    let hotel = service
        .create(owner, UserRole::Owner, hotel_draft())
        .await
        .unwrap();

    assert_eq!(hotel.owner_id, owner);
    assert!(hotel.is_approved);
}

#[tokio::test]
async fn test_hotel_updates_by_a_stranger_are_forbidden() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = HotelCatalog::new(Arc::new(uow));

    let result = service
        .update(Uuid::new_v4(), UserRole::Owner, hotel_id, HotelPatch::default())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_approval_is_admin_only() {
    let owner = Uuid::new_v4();
    let hotel = test_hotel(Uuid::new_v4(), owner);
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = HotelCatalog::new(Arc::new(uow));

    // The owner may edit the listing, but not its approval flag
    let patch = HotelPatch {
        is_approved: Some(true),
        ..Default::default()
    };
    let result = service.update(owner, UserRole::Owner, hotel_id, patch).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_admins_can_revoke_approval() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));
    hotels
        .expect_update()
        .withf(|h| !h.is_approved)
        .returning(|h| Ok(h));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = HotelCatalog::new(Arc::new(uow));

    let patch = HotelPatch {
        is_approved: Some(false),
        ..Default::default()
    };
    let updated = service
        .update(Uuid::new_v4(), UserRole::Admin, hotel_id, patch)
        .await
        .unwrap();

    assert!(!updated.is_approved);
}

#[tokio::test]
async fn test_hotel_delete_cascades() {
    let owner = Uuid::new_v4();
    let hotel = test_hotel(Uuid::new_v4(), owner);
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));
    hotels
        .expect_delete_cascade()
        .with(eq(hotel_id))
        .returning(|_| Ok(()));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = HotelCatalog::new(Arc::new(uow));

    assert!(service.delete(owner, UserRole::Owner, hotel_id).await.is_ok());
}

// =============================================================================
// Room service
// =============================================================================

#[tokio::test]
async fn test_rooms_join_a_hotel_the_caller_owns() {
    let owner = Uuid::new_v4();
    let hotel = test_hotel(Uuid::new_v4(), owner);
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .with(eq(hotel_id))
        .returning(move |_| Ok(Some(hotel.clone())));

    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_create()
        .withf(move |r| r.hotel_id == hotel_id && r.is_available)
        .returning(|r| Ok(r));

    let uow = TestUnitOfWork::new().with_hotels(hotels).with_rooms(rooms);
    let service = RoomManager::new(Arc::new(uow));

    let draft = RoomDraft {
        hotel_id,
        room_type: "Suite".to_string(),
        price: 9000,
        capacity: 3,
        description: "Corner suite".to_string(),
        images: vec![],
    };
    let room = service.create(owner, UserRole::Owner, draft).await.unwrap();

    assert_eq!(room.hotel_id, hotel_id);
    assert!(room.is_available);
}

#[tokio::test]
async fn test_rooms_cannot_join_a_foreign_hotel() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = RoomManager::new(Arc::new(uow));

    let draft = RoomDraft {
        hotel_id,
        room_type: "Suite".to_string(),
        price: 9000,
        capacity: 3,
        description: "Corner suite".to_string(),
        images: vec![],
    };
    let result = service.create(Uuid::new_v4(), UserRole::Owner, draft).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_room_updates_go_through_the_hotel_gate() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let room = test_room(Uuid::new_v4(), hotel.id, 5000);
    let room_id = room.id;

    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_id()
        .returning(move |_| Ok(Some(room.clone())));

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels).with_rooms(rooms);
    let service = RoomManager::new(Arc::new(uow));

    let result = service
        .update(Uuid::new_v4(), UserRole::Owner, room_id, RoomPatch::default())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_room_delete_by_the_hotel_owner() {
    let owner = Uuid::new_v4();
    let hotel = test_hotel(Uuid::new_v4(), owner);
    let room = test_room(Uuid::new_v4(), hotel.id, 5000);
    let room_id = room.id;

    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_id()
        .returning(move |_| Ok(Some(room.clone())));
    rooms.expect_delete().with(eq(room_id)).returning(|_| Ok(()));

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels).with_rooms(rooms);
    let service = RoomManager::new(Arc::new(uow));

    assert!(service.delete(owner, UserRole::Owner, room_id).await.is_ok());
}

// =============================================================================
// Booking service
// =============================================================================

#[tokio::test]
async fn test_booking_total_is_recomputed_from_the_room_price() {
    let guest = Uuid::new_v4();
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let room = test_room(Uuid::new_v4(), hotel.id, 5000);
    let (hotel_id, room_id) = (hotel.id, room.id);

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .with(eq(hotel_id))
        .returning(move |_| Ok(Some(hotel.clone())));

    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_id()
        .with(eq(room_id))
        .returning(move |_| Ok(Some(room.clone())));

    let mut bookings = MockBookingRepository::new();
    bookings.expect_create().returning(|b| Ok(b));

    let uow = TestUnitOfWork::new()
        .with_hotels(hotels)
        .with_rooms(rooms)
        .with_bookings(bookings);
    let service = BookingManager::new(Arc::new(uow));

    // Two nights at 5000
    let booking = service
        .create(
            guest,
            hotel_id,
            room_id,
            date(2025, 3, 10),
            date(2025, 3, 12),
            10_000,
        )
        .await
        .unwrap();

    assert_eq!(booking.total_amount, 10_000);
    assert_eq!(booking.payment_status, PaymentStatus::Pending);
    assert_eq!(booking.booking_status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_booking_rejects_a_client_supplied_total() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let room = test_room(Uuid::new_v4(), hotel.id, 5000);
    let (hotel_id, room_id) = (hotel.id, room.id);

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_id()
        .returning(move |_| Ok(Some(room.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels).with_rooms(rooms);
    let service = BookingManager::new(Arc::new(uow));

    let result = service
        .create(
            Uuid::new_v4(),
            hotel_id,
            room_id,
            date(2025, 3, 10),
            date(2025, 3, 12),
            1,
        )
        .await;

    match result.unwrap_err() {
        AppError::Validation(msg) => assert!(msg.contains("10000"), "got: {msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_booking_rejects_a_room_from_another_hotel() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let room = test_room(Uuid::new_v4(), Uuid::new_v4(), 5000);
    let (hotel_id, room_id) = (hotel.id, room.id);

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_id()
        .returning(move |_| Ok(Some(room.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels).with_rooms(rooms);
    let service = BookingManager::new(Arc::new(uow));

    let result = service
        .create(
            Uuid::new_v4(),
            hotel_id,
            room_id,
            date(2025, 3, 10),
            date(2025, 3, 12),
            10_000,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_booking_rejects_inverted_dates() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let room = test_room(Uuid::new_v4(), hotel.id, 5000);
    let (hotel_id, room_id) = (hotel.id, room.id);

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_id()
        .returning(move |_| Ok(Some(room.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels).with_rooms(rooms);
    let service = BookingManager::new(Arc::new(uow));

    let result = service
        .create(
            Uuid::new_v4(),
            hotel_id,
            room_id,
            date(2025, 3, 12),
            date(2025, 3, 12),
            0,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_customers_only_see_their_own_bookings() {
    let me = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_list_detailed()
        .with(eq(BookingScope::ForUser(me)))
        .returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let service = BookingManager::new(Arc::new(uow));

    // A hotel filter from a customer is ignored, not honoured
    let result = service
        .list(me, UserRole::Customer, Some(Uuid::new_v4()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_owner_listing_is_scoped_to_their_hotels() {
    let me = Uuid::new_v4();
    let mine = Uuid::new_v4();

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_ids_owned_by()
        .with(eq(me))
        .returning(move |_| Ok(vec![mine]));

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_list_detailed()
        .with(eq(BookingScope::ForHotels(vec![mine])))
        .returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork::new()
        .with_hotels(hotels)
        .with_bookings(bookings);
    let service = BookingManager::new(Arc::new(uow));

    assert!(service.list(me, UserRole::Owner, None).await.is_ok());
}

#[tokio::test]
async fn test_owner_cannot_list_a_foreign_hotels_bookings() {
    let me = Uuid::new_v4();
    let mine = Uuid::new_v4();
    let theirs = Uuid::new_v4();

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_ids_owned_by()
        .returning(move |_| Ok(vec![mine]));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = BookingManager::new(Arc::new(uow));

    let result = service.list(me, UserRole::Owner, Some(theirs)).await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_get_booking_access_control() {
    let guest = Uuid::new_v4();
    let owner = Uuid::new_v4();
    let booking = test_booking(guest);
    let booking_id = booking.id;

    let full = BookingFull {
        booking,
        hotel: Some(test_hotel(Uuid::new_v4(), owner)),
        room: None,
        user: None,
    };

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_full()
        .with(eq(booking_id))
        .returning(move |_| Ok(Some(full.clone())));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let service = BookingManager::new(Arc::new(uow));

    // Guest, hotel owner and admin may read it
    assert!(service.get(guest, UserRole::Customer, booking_id).await.is_ok());
    assert!(service.get(owner, UserRole::Owner, booking_id).await.is_ok());
    assert!(service
        .get(Uuid::new_v4(), UserRole::Admin, booking_id)
        .await
        .is_ok());

    // Anyone else may not
    let stranger = service
        .get(Uuid::new_v4(), UserRole::Customer, booking_id)
        .await;
    assert!(matches!(stranger.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_cancel_refunds_a_paid_booking() {
    let guest = Uuid::new_v4();
    let booking = paid_booking(guest);
    let booking_id = booking.id;

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));
    bookings
        .expect_update()
        .withf(|b| {
            b.payment_status == PaymentStatus::Refunded
                && b.booking_status == BookingStatus::Cancelled
        })
        .returning(|b| Ok(b));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let service = BookingManager::new(Arc::new(uow));

    let cancelled = service
        .cancel(guest, UserRole::Customer, booking_id)
        .await
        .unwrap();

    assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);
    assert_eq!(cancelled.booking_status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_rejects_an_unpaid_booking() {
    let guest = Uuid::new_v4();
    let booking = test_booking(guest);
    let booking_id = booking.id;

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let service = BookingManager::new(Arc::new(uow));

    let result = service.cancel(guest, UserRole::Customer, booking_id).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_cancel_by_a_stranger_is_forbidden() {
    let booking = paid_booking(Uuid::new_v4());
    let booking_id = booking.id;

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let service = BookingManager::new(Arc::new(uow));

    let result = service
        .cancel(Uuid::new_v4(), UserRole::Customer, booking_id)
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_admins_can_cancel_any_booking() {
    let booking = paid_booking(Uuid::new_v4());
    let booking_id = booking.id;

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));
    bookings.expect_update().returning(|b| Ok(b));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let service = BookingManager::new(Arc::new(uow));

    let cancelled = service
        .cancel(Uuid::new_v4(), UserRole::Admin, booking_id)
        .await
        .unwrap();
    assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);
}

// =============================================================================
// Payment service
// =============================================================================

#[tokio::test]
async fn test_create_order_binds_the_booking_to_the_gateway_order() {
    let guest = Uuid::new_v4();
    let booking = test_booking(guest);
    let booking_id = booking.id;

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));
    bookings
        .expect_update()
        .withf(|b| b.gateway_order_id.as_deref() == Some("order_new_1"))
        .returning(|b| Ok(b));

    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_create_order()
        .withf(move |bid, _, amount| *bid == booking_id && *amount == 10_000)
        .returning(|_, _, amount| {
            Ok(GatewayOrder {
                id: "order_new_1".to_string(),
                amount: amount * 100,
                currency: "INR".to_string(),
            })
        });

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let gateway: Arc<dyn PaymentGateway> = Arc::new(gateway);
    let service = PaymentProcessor::new(Arc::new(uow), gateway, GATEWAY_SECRET.to_string());

    let order = service
        .create_order(guest, UserRole::Customer, booking_id, 10_000)
        .await
        .unwrap();

    assert_eq!(order.id, "order_new_1");
    assert_eq!(order.amount, 1_000_000);
    assert_eq!(order.currency, "INR");
}

#[tokio::test]
async fn test_create_order_rejects_an_amount_mismatch() {
    let guest = Uuid::new_v4();
    let booking = test_booking(guest);
    let booking_id = booking.id;

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    // No gateway expectations: a mismatch must never reach the gateway
    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockPaymentGateway::new());
    let service = PaymentProcessor::new(Arc::new(uow), gateway, GATEWAY_SECRET.to_string());

    let result = service
        .create_order(guest, UserRole::Customer, booking_id, 9_999)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_order_rejects_a_booking_not_awaiting_payment() {
    let guest = Uuid::new_v4();
    let booking = paid_booking(guest);
    let booking_id = booking.id;

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockPaymentGateway::new());
    let service = PaymentProcessor::new(Arc::new(uow), gateway, GATEWAY_SECRET.to_string());

    let result = service
        .create_order(guest, UserRole::Customer, booking_id, 10_000)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_order_for_a_foreign_booking_is_forbidden() {
    let booking = test_booking(Uuid::new_v4());
    let booking_id = booking.id;

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockPaymentGateway::new());
    let service = PaymentProcessor::new(Arc::new(uow), gateway, GATEWAY_SECRET.to_string());

    let result = service
        .create_order(Uuid::new_v4(), UserRole::Customer, booking_id, 10_000)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_verify_accepts_a_signed_bound_order() {
    let guest = Uuid::new_v4();
    let booking = bound_booking(guest, "order_ok_1");
    let booking_id = booking.id;
    let signature = compute_signature(GATEWAY_SECRET, "order_ok_1", "pay_ok_1");

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));
    bookings
        .expect_update()
        .withf(|b| {
            b.payment_status == PaymentStatus::Paid
                && b.gateway_payment_id.as_deref() == Some("pay_ok_1")
        })
        .returning(|b| Ok(b));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockPaymentGateway::new());
    let service = PaymentProcessor::new(Arc::new(uow), gateway, GATEWAY_SECRET.to_string());

    let paid = service
        .verify(
            guest,
            UserRole::Customer,
            booking_id,
            "order_ok_1".to_string(),
            "pay_ok_1".to_string(),
            signature,
        )
        .await
        .unwrap();

    assert_eq!(paid.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_verify_rejects_a_forged_signature() {
    let guest = Uuid::new_v4();
    let booking = bound_booking(guest, "order_ok_1");
    let booking_id = booking.id;
    // Signed over a different payment id than the one presented
    let forged = compute_signature(GATEWAY_SECRET, "order_ok_1", "pay_other");

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));
    bookings
        .expect_update()
        .withf(|b| b.payment_status == PaymentStatus::Failed)
        .returning(|b| Ok(b));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockPaymentGateway::new());
    let service = PaymentProcessor::new(Arc::new(uow), gateway, GATEWAY_SECRET.to_string());

    let result = service
        .verify(
            guest,
            UserRole::Customer,
            booking_id,
            "order_ok_1".to_string(),
            "pay_ok_1".to_string(),
            forged,
        )
        .await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::PaymentVerificationFailed
    ));
}

#[tokio::test]
async fn test_verify_rejects_a_valid_signature_over_the_wrong_order() {
    let guest = Uuid::new_v4();
    let booking = bound_booking(guest, "order_ok_1");
    let booking_id = booking.id;
    // The signature itself checks out, but not for the bound order
    let signature = compute_signature(GATEWAY_SECRET, "order_other", "pay_ok_1");

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |_| Ok(Some(booking.clone())));
    bookings
        .expect_update()
        .withf(|b| b.payment_status == PaymentStatus::Failed)
        .returning(|b| Ok(b));

    let uow = TestUnitOfWork::new().with_bookings(bookings);
    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockPaymentGateway::new());
    let service = PaymentProcessor::new(Arc::new(uow), gateway, GATEWAY_SECRET.to_string());

    let result = service
        .verify(
            guest,
            UserRole::Customer,
            booking_id,
            "order_other".to_string(),
            "pay_ok_1".to_string(),
            signature,
        )
        .await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::PaymentVerificationFailed
    ));
}

// =============================================================================
// Review service
// =============================================================================

#[tokio::test]
async fn test_reviews_require_an_existing_hotel() {
    let mut hotels = MockHotelRepository::new();
    hotels.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = ReviewManager::new(Arc::new(uow));

    let result = service
        .create(Uuid::new_v4(), Uuid::new_v4(), 5, "Lovely".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("Hotel")));
}

#[tokio::test]
async fn test_review_rating_is_validated_before_writing() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let uow = TestUnitOfWork::new().with_hotels(hotels);
    let service = ReviewManager::new(Arc::new(uow));

    let result = service
        .create(Uuid::new_v4(), hotel_id, 6, "Off the scale".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_review_creation_goes_through_the_rescoring_write() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_create_and_rescore()
        .withf(move |r| r.hotel_id == hotel_id && r.rating == 5)
        .returning(|r| Ok(r));

    let uow = TestUnitOfWork::new()
        .with_hotels(hotels)
        .with_reviews(reviews);
    let service = ReviewManager::new(Arc::new(uow));

    let review = service
        .create(Uuid::new_v4(), hotel_id, 5, "Lovely stay".to_string())
        .await
        .unwrap();

    assert_eq!(review.rating, 5);
}

#[tokio::test]
async fn test_a_second_review_for_the_same_hotel_is_rejected() {
    let hotel = test_hotel(Uuid::new_v4(), Uuid::new_v4());
    let hotel_id = hotel.id;

    let mut hotels = MockHotelRepository::new();
    hotels
        .expect_find_by_id()
        .returning(move |_| Ok(Some(hotel.clone())));

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_create_and_rescore()
        .returning(|_| Err(AppError::DuplicateReview));

    let uow = TestUnitOfWork::new()
        .with_hotels(hotels)
        .with_reviews(reviews);
    let service = ReviewManager::new(Arc::new(uow));

    let result = service
        .create(Uuid::new_v4(), hotel_id, 4, "Again".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::DuplicateReview));
}

#[tokio::test]
async fn test_reviews_are_deleted_by_author_or_admin_only() {
    let author = Uuid::new_v4();
    let review = Review::new(
        Uuid::new_v4(),
        author,
        Uuid::new_v4(),
        4,
        "Nice stay".to_string(),
    )
    .unwrap();
    let review_id = review.id;

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .returning(move |_| Ok(Some(review.clone())));
    reviews
        .expect_delete_and_rescore()
        .with(eq(review_id))
        .returning(|_| Ok(()));

    let uow = TestUnitOfWork::new().with_reviews(reviews);
    let service = ReviewManager::new(Arc::new(uow));

    let stranger = service
        .delete(Uuid::new_v4(), UserRole::Customer, review_id)
        .await;
    assert!(matches!(stranger.unwrap_err(), AppError::Forbidden));

    assert!(service
        .delete(author, UserRole::Customer, review_id)
        .await
        .is_ok());
    assert!(service
        .delete(Uuid::new_v4(), UserRole::Admin, review_id)
        .await
        .is_ok());
}

// =============================================================================
// Analytics service
// =============================================================================

#[tokio::test]
async fn test_overview_aggregates_paid_revenue_by_month() {
    let mut users = MockUserRepository::new();
    users.expect_count().returning(|| Ok(4));

    let mut hotels = MockHotelRepository::new();
    hotels.expect_count().returning(|| Ok(6));
    hotels.expect_count_unapproved().returning(|| Ok(1));

    let mut bookings = MockBookingRepository::new();
    bookings.expect_count().returning(|| Ok(10));
    bookings.expect_paid_summaries().returning(|| {
        Ok(vec![
            PaidBooking {
                created_at: Utc.with_ymd_and_hms(2025, 3, 5, 10, 0, 0).unwrap(),
                total_amount: 10_000,
            },
            PaidBooking {
                created_at: Utc.with_ymd_and_hms(2025, 3, 20, 18, 30, 0).unwrap(),
                total_amount: 5_000,
            },
            PaidBooking {
                created_at: Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap(),
                total_amount: 7_000,
            },
        ])
    });
    bookings.expect_recent_detailed().returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork::new()
        .with_users(users)
        .with_hotels(hotels)
        .with_bookings(bookings);
    let service = StatsCollector::new(Arc::new(uow));

    let stats = service.overview().await.unwrap();

    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.total_hotels, 6);
    assert_eq!(stats.total_bookings, 10);
    assert_eq!(stats.pending_approvals, 1);
    assert_eq!(stats.total_revenue, 22_000);

    assert_eq!(stats.monthly_revenue.len(), 2);
    assert_eq!(stats.monthly_revenue[0].month, 3);
    assert_eq!(stats.monthly_revenue[0].revenue, 15_000);
    assert_eq!(stats.monthly_revenue[0].count, 2);
    assert_eq!(stats.monthly_revenue[1].month, 4);
    assert_eq!(stats.monthly_revenue[1].revenue, 7_000);
    assert_eq!(stats.monthly_revenue[1].count, 1);
}

#[tokio::test]
async fn test_user_listing_is_paginated() {
    let mut users = MockUserRepository::new();
    users.expect_list().returning(|_| {
        Ok((
            vec![
                test_user(Uuid::new_v4(), UserRole::Customer),
                test_user(Uuid::new_v4(), UserRole::Owner),
            ],
            25,
        ))
    });

    let uow = TestUnitOfWork::new().with_users(users);
    let service = StatsCollector::new(Arc::new(uow));

    let page = service
        .list_users(PaginationParams::new(2, 10))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].role, "customer");
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.pages, 3);
}
