//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    default_dispatcher, CreatePaymentIntentCommand, CreatePaymentIntentHandler,
    CreatePaymentIntentResult, GetPaymentIntentHandler, GetPaymentIntentQuery,
    ProcessWebhookHandler,
};
