//! HTTP adapter for checkout endpoints.
//!
//! - `GET /config` - Publishable key for the checkout page
//! - `POST /create-payment-intent` - Create a payment intent
//! - `GET /payment/next` - Redirect to the success page after payment

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CheckoutApiError, CheckoutAppState};
pub use routes::checkout_router;
