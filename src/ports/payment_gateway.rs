//! Payment gateway port for the external payment processor.
//!
//! Defines the contract for creating and retrieving payment intents. The
//! Stripe adapter implements it over HTTP; tests use the in-memory mock.
//!
//! # Design
//!
//! - **Gateway agnostic**: requests are built from validated domain types
//! - **No leakage**: `GatewayError` keeps raw processor detail apart from the
//!   message shown to callers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::checkout::CreatePaymentIntentParams;

/// Port for payment intent operations against the processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent.
    ///
    /// The returned intent carries the client secret for the browser.
    async fn create_payment_intent(
        &self,
        params: CreatePaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError>;

    /// Retrieve a payment intent by processor id.
    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, GatewayError>;
}

/// Payment intent as reported by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor's payment intent id (pi_xxx).
    pub id: String,

    /// Secret the client uses to confirm the payment.
    pub client_secret: Option<String>,

    /// Current lifecycle status.
    pub status: PaymentIntentStatus,

    /// Amount in the currency's minor unit.
    pub amount: i64,

    /// Lowercase ISO currency code.
    pub currency: String,
}

/// Payment intent lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,

    /// Status added by the processor after this code was written.
    #[serde(other)]
    Unknown,
}

/// Errors from payment gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    /// Error code for categorization.
    pub code: GatewayErrorCode,

    /// Diagnostic message. Logged server-side, never sent to callers.
    pub message: String,

    /// Processor's error code (if available).
    pub processor_code: Option<String>,
}

impl GatewayError {
    /// Create a new gateway error.
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            processor_code: None,
        }
    }

    /// Create with processor code.
    pub fn with_processor_code(mut self, code: impl Into<String>) -> Self {
        self.processor_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Network, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(GatewayErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Message that is safe to return to the caller.
    pub fn public_message(&self) -> &'static str {
        self.code.public_message()
    }

    /// Whether the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Network connectivity issue.
    Network,

    /// API authentication failed.
    Authentication,

    /// Card was declined.
    CardDeclined,

    /// Request rejected as invalid by the processor.
    InvalidRequest,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimited,

    /// Processor API error or unparseable response.
    Processor,
}

impl GatewayErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::Network | GatewayErrorCode::RateLimited
        )
    }

    /// Caller-facing message for this category.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayErrorCode::CardDeclined => "Your payment method was declined.",
            GatewayErrorCode::InvalidRequest => {
                "The payment could not be created with the details provided."
            }
            GatewayErrorCode::NotFound => "The requested payment could not be found.",
            GatewayErrorCode::RateLimited | GatewayErrorCode::Network => {
                "The payment service is temporarily unavailable. Please try again."
            }
            GatewayErrorCode::Authentication | GatewayErrorCode::Processor => {
                "The payment could not be processed."
            }
        }
    }
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::Network => "network_error",
            GatewayErrorCode::Authentication => "authentication_error",
            GatewayErrorCode::CardDeclined => "card_declined",
            GatewayErrorCode::InvalidRequest => "invalid_request",
            GatewayErrorCode::NotFound => "not_found",
            GatewayErrorCode::RateLimited => "rate_limited",
            GatewayErrorCode::Processor => "processor_error",
        };
        write!(f, "{}", s)
    }
}
