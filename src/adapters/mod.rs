//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routers for the checkout page and processor webhooks
//! - `stripe` - Payment gateway backed by the Stripe REST API

pub mod http;
pub mod stripe;

pub use http::app_router;
pub use stripe::{MockPaymentGateway, StripeConfig, StripeGateway};
