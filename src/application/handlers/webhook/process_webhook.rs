//! ProcessWebhookHandler - Command handler for inbound processor webhooks.
//!
//! Runs the full ingestion pipeline: verify the signature, parse the
//! envelope, dispatch by event type. Verification and parse failures stop the
//! pipeline before any handler runs.

use std::sync::Arc;

use crate::domain::webhook::{
    parse, DispatchOutcome, EventDispatcher, RawWebhookRequest, WebhookError, WebhookVerifier,
};

/// Handler for processing webhooks from the payment processor.
pub struct ProcessWebhookHandler {
    verifier: WebhookVerifier,
    dispatcher: Arc<EventDispatcher>,
}

impl ProcessWebhookHandler {
    pub fn new(verifier: WebhookVerifier, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            verifier,
            dispatcher,
        }
    }

    /// Processes one webhook delivery.
    ///
    /// # Errors
    ///
    /// `WebhookError` when the request is not authentic, is stale, or does
    /// not parse. Handler failures are reported through the outcome instead.
    pub async fn handle(&self, request: RawWebhookRequest) -> Result<DispatchOutcome, WebhookError> {
        // 1. Verify
        let verified = self
            .verifier
            .verify_request(&request)
            .map_err(|err| rejected(err.into()))?;

        // 2. Parse
        let event = parse(&verified).map_err(|err| rejected(err.into()))?;

        // 3. Dispatch
        let outcome = self.dispatcher.dispatch(&event).await;
        match &outcome {
            DispatchOutcome::Handled => {
                tracing::info!(event_id = %event.id, event_type = %event.event_type, "Webhook handled");
            }
            DispatchOutcome::Acknowledged => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "No handler registered, acknowledging"
                );
            }
            DispatchOutcome::HandlerFailed(err) if err.is_fatal() => {
                tracing::error!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    error = %err,
                    "Webhook handler failed"
                );
            }
            DispatchOutcome::HandlerFailed(err) => {
                tracing::warn!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    error = %err,
                    "Webhook handler failed, acknowledging"
                );
            }
        }

        Ok(outcome)
    }
}

fn rejected(err: WebhookError) -> WebhookError {
    tracing::warn!(error = %err, kind = err.kind(), "Webhook rejected");
    err
}
