//! Payment reconciliation service.
//!
//! An order is created against the gateway for the booking's stored
//! total and bound to the booking by its gateway order id. A later
//! verification must present that order id plus a signature that
//! checks out; anything else marks the payment failed.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Booking, BookingStatus, PaymentStatus, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::payments::{verify_signature, GatewayOrder, PaymentGateway};
use crate::infra::UnitOfWork;

/// Payment service trait for dependency injection.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Register a gateway order for a booking awaiting payment and
    /// bind the booking to it
    async fn create_order(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        booking_id: Uuid,
        amount: i64,
    ) -> AppResult<GatewayOrder>;

    /// Verify a checkout confirmation. A valid signature over the
    /// bound order marks the booking paid; anything else marks it
    /// failed and errors.
    async fn verify(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        booking_id: Uuid,
        order_id: String,
        payment_id: String,
        signature: String,
    ) -> AppResult<Booking>;
}

/// Concrete implementation of PaymentService using Unit of Work and a
/// gateway client.
pub struct PaymentProcessor<U: UnitOfWork> {
    uow: Arc<U>,
    gateway: Arc<dyn PaymentGateway>,
    gateway_secret: String,
}

impl<U: UnitOfWork> PaymentProcessor<U> {
    /// Create new payment service instance
    pub fn new(uow: Arc<U>, gateway: Arc<dyn PaymentGateway>, gateway_secret: String) -> Self {
        Self {
            uow,
            gateway,
            gateway_secret,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> PaymentService for PaymentProcessor<U> {
    async fn create_order(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        booking_id: Uuid,
        amount: i64,
    ) -> AppResult<GatewayOrder> {
        let mut booking = self
            .uow
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_not_found("Booking")?;

        if booking.user_id != actor_id && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        if amount != booking.total_amount {
            return Err(AppError::validation("Amount does not match the booking total"));
        }

        // State is checked before the gateway call so a booking that
        // cannot accept an order never creates one upstream
        if booking.booking_status != BookingStatus::Confirmed
            || booking.payment_status != PaymentStatus::Pending
        {
            return Err(AppError::validation("Booking is not awaiting payment"));
        }

        let order = self
            .gateway
            .create_order(booking.id, booking.user_id, amount)
            .await?;

        booking.attach_order(order.id.clone())?;
        self.uow.bookings().update(booking).await?;

        Ok(order)
    }

    async fn verify(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        booking_id: Uuid,
        order_id: String,
        payment_id: String,
        signature: String,
    ) -> AppResult<Booking> {
        let mut booking = self
            .uow
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_not_found("Booking")?;

        if booking.user_id != actor_id && !actor_role.is_admin() {
            return Err(AppError::Forbidden);
        }

        let signature_valid =
            verify_signature(&self.gateway_secret, &order_id, &payment_id, &signature);

        // The signature only covers order|payment, so the order must
        // additionally be the one bound to this booking
        let order_bound = booking.gateway_order_id.as_deref() == Some(order_id.as_str());

        if signature_valid && order_bound {
            booking.mark_paid(order_id, payment_id)?;
            return self.uow.bookings().update(booking).await;
        }

        tracing::warn!(
            booking_id = %booking.id,
            signature_valid,
            order_bound,
            "payment verification failed"
        );

        // Persist the failure before reporting it, but never downgrade
        // a booking that is already paid or refunded
        if booking.payment_status == PaymentStatus::Pending {
            booking.mark_failed()?;
            self.uow.bookings().update(booking).await?;
        }

        Err(AppError::PaymentVerificationFailed)
    }
}
