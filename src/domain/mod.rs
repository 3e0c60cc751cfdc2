//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `webhook` - Signature verification, event parsing and dispatch
//! - `checkout` - Payment intent request validation

pub mod checkout;
pub mod webhook;
