//! Booking domain entity and payment/booking state machine.
//!
//! A booking starts as (pending, confirmed). Payment reconciliation moves the
//! payment leg to paid or failed; a cancellation of a paid booking moves the
//! pair to (refunded, cancelled). All other transitions are rejected.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::hotel::{Hotel, HotelSummary};
use crate::domain::room::{Room, RoomSummary};
use crate::domain::user::{UserRole, UserSummary};
use crate::errors::{AppError, AppResult};

/// Lifecycle of the stay itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl From<&str> for BookingStatus {
    fn from(s: &str) -> Self {
        match s {
            "cancelled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            _ => BookingStatus::Confirmed,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle of the money leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "paid" => PaymentStatus::Paid,
            "failed" => PaymentStatus::Failed,
            "refunded" => PaymentStatus::Refunded,
            _ => PaymentStatus::Pending,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        };
        write!(f, "{}", s)
    }
}

/// Number of nights between two dates (check-out day is not slept in)
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Booking domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    /// The customer who booked; stamped from the authenticated caller
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// Room price times nights, in rupees; computed server-side
    pub total_amount: i64,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    /// Gateway order this booking is bound to, set when an order is created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new booking in the initial (pending, confirmed) state.
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        hotel_id: Uuid,
        room_id: Uuid,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        total_amount: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            hotel_id,
            room_id,
            check_in_date,
            check_out_date,
            total_amount,
            payment_status: PaymentStatus::Pending,
            booking_status: BookingStatus::Confirmed,
            gateway_order_id: None,
            gateway_payment_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn nights(&self) -> i64 {
        nights(self.check_in_date, self.check_out_date)
    }

    /// Bind this booking to a freshly created gateway order. Only pending,
    /// non-cancelled bookings can start a payment.
    pub fn attach_order(&mut self, order_id: String) -> AppResult<()> {
        if self.booking_status != BookingStatus::Confirmed {
            return Err(AppError::validation("Booking is not active"));
        }
        if self.payment_status != PaymentStatus::Pending {
            return Err(AppError::validation(format!(
                "Cannot start payment for a {} booking",
                self.payment_status
            )));
        }
        self.gateway_order_id = Some(order_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record a verified payment. Replaying an already-paid booking is a
    /// no-op; a failed or refunded booking can never become paid.
    pub fn mark_paid(&mut self, order_id: String, payment_id: String) -> AppResult<()> {
        if self.booking_status != BookingStatus::Confirmed {
            return Err(AppError::validation("Booking is not active"));
        }
        match self.payment_status {
            PaymentStatus::Paid => Ok(()),
            PaymentStatus::Pending => {
                self.payment_status = PaymentStatus::Paid;
                self.gateway_order_id = Some(order_id);
                self.gateway_payment_id = Some(payment_id);
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(AppError::validation(format!(
                "Cannot mark a {} booking as paid",
                other
            ))),
        }
    }

    /// Record a failed payment verification. Terminal for the money leg; a
    /// paid or refunded booking is never downgraded.
    pub fn mark_failed(&mut self) -> AppResult<()> {
        match self.payment_status {
            PaymentStatus::Pending | PaymentStatus::Failed => {
                self.payment_status = PaymentStatus::Failed;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(AppError::validation(format!(
                "Cannot mark a {} booking as failed",
                other
            ))),
        }
    }

    /// Cancel a paid booking, refunding the money leg. The only path to
    /// (refunded, cancelled); everything else is rejected.
    pub fn cancel(&mut self) -> AppResult<()> {
        if self.booking_status == BookingStatus::Cancelled {
            return Err(AppError::validation("Booking is already cancelled"));
        }
        if self.booking_status != BookingStatus::Confirmed
            || self.payment_status != PaymentStatus::Paid
        {
            return Err(AppError::validation(
                "Only paid, confirmed bookings can be cancelled",
            ));
        }
        self.payment_status = PaymentStatus::Refunded;
        self.booking_status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Booking with its hotel, room and customer attached (list views)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HotelSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

/// Booking with the complete hotel and room records attached (single read)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingFull {
    #[serde(flatten)]
    pub booking: Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel: Option<Hotel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

/// Which bookings a principal may see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingScope {
    /// Every booking in the system
    All,
    /// Bookings created by one customer
    ForUser(Uuid),
    /// Bookings against a single hotel
    ForHotel(Uuid),
    /// Bookings against a set of hotels (an owner's portfolio)
    ForHotels(Vec<Uuid>),
}

/// Decide the booking visibility scope for a principal.
///
/// Customers only ever see their own bookings. Owners see bookings of hotels
/// they own; asking for a hotel outside the portfolio is refused. Admins see
/// everything, optionally narrowed to one hotel.
pub fn booking_scope(
    role: UserRole,
    user_id: Uuid,
    owned_hotel_ids: &[Uuid],
    requested_hotel: Option<Uuid>,
) -> AppResult<BookingScope> {
    match role {
        UserRole::Customer => Ok(BookingScope::ForUser(user_id)),
        UserRole::Admin => Ok(match requested_hotel {
            Some(hotel_id) => BookingScope::ForHotel(hotel_id),
            None => BookingScope::All,
        }),
        UserRole::Owner => match requested_hotel {
            Some(hotel_id) => {
                if owned_hotel_ids.contains(&hotel_id) {
                    Ok(BookingScope::ForHotel(hotel_id))
                } else {
                    Err(AppError::Forbidden)
                }
            }
            None => Ok(BookingScope::ForHotels(owned_hotel_ids.to_vec())),
        },
    }
}
