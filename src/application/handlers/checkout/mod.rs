//! Checkout handlers.
//!
//! ## Commands
//! - Creating a payment intent for the checkout page
//!
//! ## Queries
//! - Looking up a payment intent after the processor redirects back

mod create_payment_intent;
mod get_payment_intent;

// Commands
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};

// Queries
pub use get_payment_intent::{GetPaymentIntentHandler, GetPaymentIntentQuery};
