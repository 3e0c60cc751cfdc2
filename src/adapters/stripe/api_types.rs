//! Stripe REST API response types.
//!
//! Only the fields this service reads are modelled.

use serde::Deserialize;

use crate::ports::{GatewayError, GatewayErrorCode, PaymentIntent, PaymentIntentStatus};

/// Stripe PaymentIntent object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// Unique identifier (pi_xxx format).
    pub id: String,

    /// Client secret for confirming the payment in the browser.
    #[serde(default)]
    pub client_secret: Option<String>,

    pub status: PaymentIntentStatus,

    /// Amount in the smallest currency unit.
    pub amount: i64,

    pub currency: String,
}

impl From<StripePaymentIntent> for PaymentIntent {
    fn from(intent: StripePaymentIntent) -> Self {
        Self {
            id: intent.id,
            client_secret: intent.client_secret,
            status: intent.status,
            amount: intent.amount,
            currency: intent.currency,
        }
    }
}

/// Stripe error response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

/// Stripe error object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Error category (card_error, invalid_request_error, ...).
    #[serde(rename = "type")]
    pub error_type: String,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub decline_code: Option<String>,
}

impl StripeApiError {
    /// Maps the Stripe error category to a gateway error code.
    pub fn error_code(&self) -> GatewayErrorCode {
        match self.error_type.as_str() {
            "card_error" => GatewayErrorCode::CardDeclined,
            "invalid_request_error" => GatewayErrorCode::InvalidRequest,
            "authentication_error" => GatewayErrorCode::Authentication,
            "rate_limit_error" => GatewayErrorCode::RateLimited,
            _ => GatewayErrorCode::Processor,
        }
    }
}

impl From<StripeApiError> for GatewayError {
    fn from(err: StripeApiError) -> Self {
        let code = err.error_code();
        let message = err
            .message
            .unwrap_or_else(|| format!("Stripe {}", err.error_type));
        let gateway_error = GatewayError::new(code, message);

        match err.decline_code.or(err.code) {
            Some(processor_code) => gateway_error.with_processor_code(processor_code),
            None => gateway_error,
        }
    }
}
