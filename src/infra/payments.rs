//! Payment gateway client.
//!
//! Orders are registered with the Razorpay REST API; payment
//! confirmations are verified locally against an HMAC-SHA256
//! signature so a forged callback can never mark a booking paid.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ORDER_RECEIPT_PREFIX, PAISE_PER_RUPEE, PAYMENT_CURRENCY, RAZORPAY_API_BASE};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

type HmacSha256 = Hmac<Sha256>;

/// An order registered with the gateway, as echoed back to the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GatewayOrder {
    /// Gateway-assigned order identifier
    pub id: String,
    /// Amount in paise
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
}

/// Payment gateway trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register an order for a booking. `amount` is in rupees; the
    /// gateway itself is billed in paise.
    async fn create_order(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        amount: i64,
    ) -> AppResult<GatewayOrder>;
}

/// Razorpay REST client
pub struct RazorpayGateway {
    http: Client,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    /// Create a client authenticating with the given API key pair
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            http: Client::new(),
            key_id,
            key_secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        amount: i64,
    ) -> AppResult<GatewayOrder> {
        let body = json!({
            "amount": amount * PAISE_PER_RUPEE,
            "currency": PAYMENT_CURRENCY,
            "receipt": format!("{ORDER_RECEIPT_PREFIX}{booking_id}"),
            "notes": {
                "bookingId": booking_id,
                "userId": user_id,
            },
        });

        let response = self
            .http
            .post(format!("{RAZORPAY_API_BASE}/orders"))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::gateway(format!("order request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::gateway(format!(
                "order rejected ({status}): {detail}"
            )));
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|err| AppError::gateway(format!("malformed order response: {err}")))
    }
}

/// Hex-encoded HMAC-SHA256 of `"<order_id>|<payment_id>"` under the
/// gateway key secret. This is the signature scheme Razorpay uses for
/// checkout confirmations.
pub fn compute_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compare a supplied signature against the derived one in constant
/// time.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, supplied: &str) -> bool {
    let expected = compute_signature(secret, order_id, payment_id);
    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_key_secret";

    #[test]
    fn signature_is_deterministic_hex() {
        let a = compute_signature(SECRET, "order_abc", "pay_xyz");
        let b = compute_signature(SECRET, "order_abc", "pay_xyz");

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_depends_on_every_input() {
        let base = compute_signature(SECRET, "order_abc", "pay_xyz");

        assert_ne!(base, compute_signature(SECRET, "order_abd", "pay_xyz"));
        assert_ne!(base, compute_signature(SECRET, "order_abc", "pay_xyw"));
        assert_ne!(base, compute_signature("other_secret", "order_abc", "pay_xyz"));
    }

    #[test]
    fn verify_accepts_matching_signature() {
        let signature = compute_signature(SECRET, "order_abc", "pay_xyz");

        assert!(verify_signature(SECRET, "order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let mut signature = compute_signature(SECRET, "order_abc", "pay_xyz");
        let flipped = if signature.ends_with('0') { '1' } else { '0' };
        signature.pop();
        signature.push(flipped);

        assert!(!verify_signature(SECRET, "order_abc", "pay_xyz", &signature));
        assert!(!verify_signature(SECRET, "order_abc", "pay_xyz", "short"));
    }
}
