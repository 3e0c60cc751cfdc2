//! HTTP adapter for the processor webhook endpoint.
//!
//! - `POST /webhook` - Signed event delivery

pub mod handlers;
pub mod routes;

pub use handlers::{
    WebhookApiError, WebhookAppState, FALLBACK_SIGNATURE_HEADER, STRIPE_SIGNATURE_HEADER,
};
pub use routes::webhook_router;
