//! Webhook error types.
//!
//! Every failure the ingestion pipeline can produce before dispatch, with the
//! HTTP status the processor should see. Rejections are never retried by the
//! processor (4xx); only fatal handler failures ask for redelivery.

use http::StatusCode;
use thiserror::Error;

/// Errors produced while checking a webhook signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Signature header is missing a timestamp or any `v1` value.
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// None of the supplied `v1` signatures match the expected one.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Signature is valid but older than the tolerance window.
    #[error("Timestamp too old: {age_secs}s exceeds tolerance of {tolerance_secs}s")]
    TimestampTooOld { age_secs: i64, tolerance_secs: i64 },
}

/// Errors produced while turning verified bytes into a [`TypedEvent`].
///
/// [`TypedEvent`]: super::TypedEvent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Payload is not well-formed JSON, or not a JSON object.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A required envelope field is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A required string field is present but empty.
    #[error("Empty field: {0}")]
    EmptyField(&'static str),
}

/// Any rejection of an inbound webhook before it reaches the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl WebhookError {
    /// Short machine-readable label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookError::Verification(VerificationError::MalformedHeader(_)) => "malformed_header",
            WebhookError::Verification(VerificationError::SignatureMismatch) => {
                "signature_mismatch"
            }
            WebhookError::Verification(VerificationError::TimestampTooOld { .. }) => {
                "timestamp_too_old"
            }
            WebhookError::Parse(_) => "parse_error",
        }
    }

    /// Maps the error to the HTTP status returned to the processor.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
