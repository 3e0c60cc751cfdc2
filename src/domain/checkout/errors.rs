//! Checkout error types.

use http::StatusCode;
use thiserror::Error;

use crate::ports::GatewayError;

/// Errors from creating or looking up a payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Unknown payment method type: {0}")]
    UnknownPaymentMethodType(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Payment intent {0} has no client secret")]
    MissingClientSecret(String),

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl CheckoutError {
    /// Message returned to the caller.
    ///
    /// Validation errors echo the caller's own input. Gateway and internal
    /// failures map to a generic message; the detail is only logged.
    pub fn public_message(&self) -> String {
        match self {
            CheckoutError::Gateway(err) => err.public_message().to_string(),
            CheckoutError::MissingClientSecret(_) => {
                "The payment could not be processed.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Every checkout failure is reported to the caller as a bad request.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
