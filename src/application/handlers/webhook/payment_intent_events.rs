//! Handlers for payment intent lifecycle events.
//!
//! Both handlers only log. They are safe to run any number of times for the
//! same event. Fulfilment (emailing a receipt, releasing goods) hooks in at
//! the succeeded handler and must stay idempotent per event id.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::webhook::{HandlerError, TypedEvent, WebhookEventHandler};
use crate::ports::PaymentIntentStatus;

pub const PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";
pub const PAYMENT_INTENT_PAYMENT_FAILED: &str = "payment_intent.payment_failed";

/// Handler view of the payment intent carried by the event.
#[derive(Debug, Clone, Deserialize)]
struct PaymentIntentObject {
    id: String,
    #[serde(default)]
    amount: Option<i64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    status: Option<PaymentIntentStatus>,
    #[serde(default)]
    last_payment_error: Option<LastPaymentError>,
}

#[derive(Debug, Clone, Deserialize)]
struct LastPaymentError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn payment_intent(event: &TypedEvent) -> Result<PaymentIntentObject, HandlerError> {
    event.deserialize_object().map_err(|e| {
        HandlerError::non_fatal(format!(
            "event {} does not carry a payment intent: {}",
            event.id, e
        ))
    })
}

/// Handles `payment_intent.succeeded`.
#[derive(Debug, Default)]
pub struct PaymentIntentSucceededHandler;

impl PaymentIntentSucceededHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WebhookEventHandler for PaymentIntentSucceededHandler {
    async fn handle(&self, event: &TypedEvent) -> Result<(), HandlerError> {
        let intent = payment_intent(event)?;

        tracing::info!(
            event_id = %event.id,
            payment_intent_id = %intent.id,
            amount = ?intent.amount,
            currency = ?intent.currency,
            status = ?intent.status,
            livemode = event.is_live(),
            "Payment received"
        );

        Ok(())
    }
}

/// Handles `payment_intent.payment_failed`.
#[derive(Debug, Default)]
pub struct PaymentIntentFailedHandler;

impl PaymentIntentFailedHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WebhookEventHandler for PaymentIntentFailedHandler {
    async fn handle(&self, event: &TypedEvent) -> Result<(), HandlerError> {
        let intent = payment_intent(event)?;
        let (decline_code, reason) = match intent.last_payment_error {
            Some(err) => (err.code, err.message),
            None => (None, None),
        };

        tracing::warn!(
            event_id = %event.id,
            payment_intent_id = %intent.id,
            decline_code = ?decline_code,
            reason = reason.as_deref().unwrap_or("unknown"),
            "Payment failed"
        );

        Ok(())
    }
}
