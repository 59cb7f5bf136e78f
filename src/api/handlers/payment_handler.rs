//! Payment handlers.

use axum::{extract::State, response::Json, routing::post, Extension, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Booking;
use crate::errors::AppResult;
use crate::infra::GatewayOrder;

/// Gateway order creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Booking the payment is for
    pub booking_id: Uuid,
    /// Amount in rupees, must equal the booking total
    #[validate(range(min = 1, message = "Amount must be positive"))]
    #[schema(example = 13000)]
    pub amount: i64,
}

/// Gateway order payload
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub order: GatewayOrder,
}

/// Checkout confirmation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    /// Gateway order id returned by create-order
    #[validate(length(min = 1, message = "Order id is required"))]
    #[schema(example = "order_NXhT3K9rM2pQv1")]
    pub order_id: String,
    /// Gateway payment id from the checkout callback
    #[validate(length(min = 1, message = "Payment id is required"))]
    #[schema(example = "pay_NXhUeF2wW8sLt7")]
    pub payment_id: String,
    /// Hex HMAC-SHA256 signature from the checkout callback
    #[validate(length(min = 1, message = "Signature is required"))]
    pub signature: String,
    /// Booking the payment is for
    pub booking_id: Uuid,
}

/// Verified payment payload
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub booking: Booking,
    pub message: String,
}

/// Create authenticated payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payment/create-order", post(create_order))
        .route("/payment/verify", post(verify_payment))
}

/// Create a gateway order for a booking
#[utoipa::path(
    post,
    path = "/api/payment/create-order",
    tag = "Payments",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Gateway order created", body = OrderResponse),
        (status = 400, description = "Amount mismatch or booking not awaiting payment"),
        (status = 403, description = "Not the booking's guest or an admin"),
        (status = 404, description = "Booking not found"),
        (status = 502, description = "Gateway rejected the order")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    let order = state
        .payment_service
        .create_order(user.id, user.role, payload.booking_id, payload.amount)
        .await?;

    Ok(Json(OrderResponse { order }))
}

/// Verify a checkout confirmation
#[utoipa::path(
    post,
    path = "/api/payment/verify",
    tag = "Payments",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified", body = VerifyPaymentResponse),
        (status = 400, description = "Signature rejected, booking marked failed"),
        (status = 403, description = "Not the booking's guest or an admin"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyPaymentResponse>> {
    let booking = state
        .payment_service
        .verify(
            user.id,
            user.role,
            payload.booking_id,
            payload.order_id,
            payload.payment_id,
            payload.signature,
        )
        .await?;

    Ok(Json(VerifyPaymentResponse {
        booking,
        message: "Payment verified".to_string(),
    }))
}
