//! Booking service - the reservation ledger.
//!
//! Totals are recomputed on the server from the room's nightly price,
//! so a client cannot book at a price of its own choosing. Status
//! changes go through the state machine on the domain entity.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{booking_scope, nights, Booking, BookingDetail, BookingFull, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Booking service trait for dependency injection.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Create a booking for the calling guest in (pending, confirmed)
    async fn create(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        total_amount: i64,
    ) -> AppResult<Booking>;

    /// Bookings visible to the caller, newest first. Customers see
    /// their own, owners their hotels', admins everything; `hotel_id`
    /// narrows the list where the role allows it.
    async fn list(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        hotel_id: Option<Uuid>,
    ) -> AppResult<Vec<BookingDetail>>;

    /// One booking with the full hotel and room attached; visible to
    /// the booking's guest, the hotel's owner, or an admin
    async fn get(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<BookingFull>;

    /// Cancel a paid booking as its guest or an admin, refunding it
    async fn cancel(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<Booking>;
}

/// Concrete implementation of BookingService using Unit of Work.
pub struct BookingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BookingManager<U> {
    /// Create new booking service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for BookingManager<U> {
    async fn create(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        total_amount: i64,
    ) -> AppResult<Booking> {
        let hotel = self
            .uow
            .hotels()
            .find_by_id(hotel_id)
            .await?
            .ok_or_not_found("Hotel")?;

        let room = self
            .uow
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or_not_found("Room")?;

        if room.hotel_id != hotel.id {
            return Err(AppError::validation("Room does not belong to the hotel"));
        }

        if check_out <= check_in {
            return Err(AppError::validation("Check-out must be after check-in"));
        }

        let stay_nights = nights(check_in, check_out);
        let expected = room.price * stay_nights;
        if total_amount != expected {
            return Err(AppError::validation(format!(
                "Total amount must be {expected} for {stay_nights} night(s)"
            )));
        }

        let booking = Booking::new(
            Uuid::new_v4(),
            user_id,
            hotel_id,
            room_id,
            check_in,
            check_out,
            total_amount,
        );

        self.uow.bookings().create(booking).await
    }

    async fn list(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        hotel_id: Option<Uuid>,
    ) -> AppResult<Vec<BookingDetail>> {
        let owned = match actor_role {
            UserRole::Owner => self.uow.hotels().ids_owned_by(actor_id).await?,
            _ => Vec::new(),
        };

        let scope = booking_scope(actor_role, actor_id, &owned, hotel_id)?;
        self.uow.bookings().list_detailed(scope).await
    }

    async fn get(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<BookingFull> {
        let full = self
            .uow
            .bookings()
            .find_full(id)
            .await?
            .ok_or_not_found("Booking")?;

        let is_hotel_owner = full
            .hotel
            .as_ref()
            .is_some_and(|h| h.owner_id == actor_id);

        if full.booking.user_id != actor_id && !is_hotel_owner && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        Ok(full)
    }

    async fn cancel(&self, actor_id: Uuid, actor_role: UserRole, id: Uuid) -> AppResult<Booking> {
        let mut booking = self
            .uow
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Booking")?;

        if booking.user_id != actor_id && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        booking.cancel()?;
        self.uow.bookings().update(booking).await
    }
}
