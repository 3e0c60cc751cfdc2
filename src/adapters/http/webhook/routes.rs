//! Axum router configuration for the webhook endpoint.

use axum::{routing::post, Router};

use super::handlers::{handle_webhook, WebhookAppState};

/// Create the webhook router.
///
/// No user authentication: requests are authenticated by signature.
///
/// # Routes
/// - `POST /webhook` - Handle processor webhooks
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new().route("/webhook", post(handle_webhook))
}
