//! HTTP adapters - REST API implementations.
//!
//! Each area has its own adapter; [`app_router`] merges them into one
//! stateless router.

pub mod checkout;
pub mod webhook;

use axum::Router;

pub use checkout::{checkout_router, CheckoutAppState};
pub use webhook::{webhook_router, WebhookAppState};

/// Full HTTP surface of the service.
pub fn app_router(checkout_state: CheckoutAppState, webhook_state: WebhookAppState) -> Router {
    Router::new()
        .merge(checkout_router().with_state(checkout_state))
        .merge(webhook_router().with_state(webhook_state))
}
