//! Webhook ingestion domain.
//!
//! Raw bytes move through three stages, each with its own error kind:
//! signature verification, envelope parsing, then dispatch by event type.
//! Nothing unverified reaches the dispatcher.

mod dispatcher;
mod errors;
mod event;
mod signature;

pub use dispatcher::{DispatchOutcome, EventDispatcher, HandlerError, WebhookEventHandler};
pub use errors::{ParseError, VerificationError, WebhookError};
pub use event::{parse, TypedEvent};
pub use signature::{
    RawWebhookRequest, SignedPayload, VerifiedEvent, WebhookVerifier, DEFAULT_TOLERANCE_SECS,
};

#[cfg(test)]
pub use signature::sign_for_test;
