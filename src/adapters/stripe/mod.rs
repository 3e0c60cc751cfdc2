//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Stripe:
//! - Payment intent creation (form-encoded REST)
//! - Payment intent retrieval
//!
//! # Security
//!
//! - The secret key is held in `secrecy::SecretString` and redacted from `Debug`
//! - Raw Stripe error bodies are logged, never returned to callers
//!
//! Webhook signature verification lives in `domain::webhook`; it needs no I/O.

mod api_types;
mod mock_gateway;
mod stripe_gateway;

pub use api_types::{StripeApiError, StripeErrorResponse, StripePaymentIntent};
pub use mock_gateway::MockPaymentGateway;
pub use stripe_gateway::{StripeConfig, StripeGateway, DEFAULT_API_BASE_URL};
