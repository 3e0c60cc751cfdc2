//! Checkout Relay - payment intent and webhook backend for a Stripe checkout
//!
//! This crate creates payment intents for a checkout page and receives the
//! processor's signed webhooks, dispatching each one by event type once its
//! signature checks out.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
