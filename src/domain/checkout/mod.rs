//! Checkout domain.
//!
//! Validates what a caller asks for and turns it into a well-formed payment
//! intent request. No I/O happens here.

mod currency;
mod errors;
mod intent_request;
mod payment_method;

pub use currency::Currency;
pub use errors::CheckoutError;
pub use intent_request::{
    AcssDebitMandateOptions, CreatePaymentIntentParams, PaymentIntentRequest, PaymentSchedule,
    TransactionType,
};
pub use payment_method::PaymentMethodType;
