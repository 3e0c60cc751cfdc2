//! Webhook handlers.
//!
//! - `ProcessWebhookHandler` runs verification, parsing and dispatch
//! - Event handlers registered with the dispatcher at startup

mod payment_intent_events;
mod process_webhook;

use std::sync::Arc;

use crate::domain::webhook::EventDispatcher;

pub use payment_intent_events::{
    PaymentIntentFailedHandler, PaymentIntentSucceededHandler, PAYMENT_INTENT_PAYMENT_FAILED,
    PAYMENT_INTENT_SUCCEEDED,
};
pub use process_webhook::ProcessWebhookHandler;

/// Dispatcher with every built-in event handler registered.
pub fn default_dispatcher() -> EventDispatcher {
    EventDispatcher::new()
        .with_handler(
            PAYMENT_INTENT_SUCCEEDED,
            Arc::new(PaymentIntentSucceededHandler::new()),
        )
        .with_handler(
            PAYMENT_INTENT_PAYMENT_FAILED,
            Arc::new(PaymentIntentFailedHandler::new()),
        )
}
