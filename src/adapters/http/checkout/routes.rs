//! Axum router configuration for checkout endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_payment_intent, get_config, payment_next, CheckoutAppState};

/// Create the checkout router.
///
/// # Routes
/// - `GET /config` - Publishable key
/// - `POST /create-payment-intent` - Create a payment intent
/// - `GET /payment/next` - Redirect target after off-site payment steps
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payment/next", get(payment_next))
}
