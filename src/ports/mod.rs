//! Ports - Interfaces to external systems.
//!
//! Ports define the contracts that adapters must implement:
//! - `PaymentGateway` - Payment intent creation and lookup

mod payment_gateway;

pub use payment_gateway::{
    GatewayError, GatewayErrorCode, PaymentGateway, PaymentIntent, PaymentIntentStatus,
};
