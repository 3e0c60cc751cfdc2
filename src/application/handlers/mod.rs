//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod checkout;
pub mod webhook;

pub use checkout::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
    GetPaymentIntentHandler, GetPaymentIntentQuery,
};
pub use webhook::{
    default_dispatcher, PaymentIntentFailedHandler, PaymentIntentSucceededHandler,
    ProcessWebhookHandler,
};
