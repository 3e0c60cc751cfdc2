//! HTTP handler for processor webhooks.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::webhook::ProcessWebhookHandler;
use crate::domain::webhook::{DispatchOutcome, RawWebhookRequest, WebhookError};

use crate::adapters::http::checkout::ErrorResponse;

/// Header carrying the processor's signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Generic signature header accepted when the processor header is absent.
pub const FALLBACK_SIGNATURE_HEADER: &str = "Signature";

/// Body message for every rejected webhook. The cause is only logged.
pub const REJECTED_MESSAGE: &str = "Webhook rejected";

/// Shared state for the webhook endpoint.
#[derive(Clone)]
pub struct WebhookAppState {
    pub processor: Arc<ProcessWebhookHandler>,
}

impl WebhookAppState {
    pub fn new(processor: ProcessWebhookHandler) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }
}

/// POST /webhook - Verify, parse and dispatch a processor event
///
/// The body is taken as raw bytes: the signature covers the exact bytes sent.
pub async fn handle_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // A missing header verifies as malformed, so there is a single rejection path.
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .or_else(|| headers.get(FALLBACK_SIGNATURE_HEADER))
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let request = RawWebhookRequest::received_now(body.to_vec(), signature);

    match state.processor.handle(request).await {
        Ok(outcome) => outcome_response(&outcome),
        Err(err) => WebhookApiError(err).into_response(),
    }
}

fn outcome_response(outcome: &DispatchOutcome) -> Response {
    let status = outcome.status_code();
    if status.is_success() {
        (status, Json(serde_json::json!({ "received": true }))).into_response()
    } else {
        (
            status,
            Json(ErrorResponse::new("Webhook handler failed")),
        )
            .into_response()
    }
}

/// API error type for rejected webhooks.
pub struct WebhookApiError(WebhookError);

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status: StatusCode = self.0.status_code();
        (status, Json(ErrorResponse::new(REJECTED_MESSAGE))).into_response()
    }
}
