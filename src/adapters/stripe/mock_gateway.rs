//! Mock payment gateway for testing.
//!
//! In-memory implementation of `PaymentGateway` for unit and integration
//! tests. Supports:
//! - Stored intents served by `retrieve_payment_intent`
//! - Error injection per method
//! - Recording of every create request

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::checkout::CreatePaymentIntentParams;
use crate::ports::{GatewayError, PaymentGateway, PaymentIntent, PaymentIntentStatus};

/// Mock payment gateway for testing.
///
/// Cloning shares state, so a test can keep a handle for assertions while
/// the application owns another.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.fail_create(GatewayError::network("connection reset"));
///
/// let result = gateway.create_payment_intent(params).await;
/// assert!(result.is_err());
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Intents by id, filled by creates and `add_intent`.
    intents: HashMap<String, PaymentIntent>,

    /// Every create request, in call order.
    create_requests: Vec<CreatePaymentIntentParams>,

    create_error: Option<GatewayError>,
    retrieve_error: Option<GatewayError>,

    next_id: u32,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Make every `create_payment_intent` call fail with `error`.
    pub fn fail_create(&self, error: GatewayError) {
        self.inner.lock().unwrap().create_error = Some(error);
    }

    /// Make every `retrieve_payment_intent` call fail with `error`.
    pub fn fail_retrieve(&self, error: GatewayError) {
        self.inner.lock().unwrap().retrieve_error = Some(error);
    }

    /// Store an intent for `retrieve_payment_intent`.
    pub fn add_intent(&self, intent: PaymentIntent) {
        self.inner
            .lock()
            .unwrap()
            .intents
            .insert(intent.id.clone(), intent);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertion Helpers
    // ════════════════════════════════════════════════════════════════════════════

    /// All create requests received so far.
    pub fn create_requests(&self) -> Vec<CreatePaymentIntentParams> {
        self.inner.lock().unwrap().create_requests.clone()
    }

    /// The most recent create request.
    pub fn last_create_request(&self) -> Option<CreatePaymentIntentParams> {
        self.inner.lock().unwrap().create_requests.last().cloned()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_payment_intent(
        &self,
        params: CreatePaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.create_requests.push(params.clone());

        if let Some(err) = state.create_error.clone() {
            return Err(err);
        }

        state.next_id += 1;
        let id = format!("pi_mock_{}", state.next_id);
        let intent = PaymentIntent {
            client_secret: Some(format!("{}_secret_mock", id)),
            id: id.clone(),
            status: PaymentIntentStatus::RequiresPaymentMethod,
            amount: params.amount,
            currency: params.currency.as_str().to_string(),
        };
        state.intents.insert(id, intent.clone());

        Ok(intent)
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, GatewayError> {
        let state = self.inner.lock().unwrap();

        if let Some(err) = state.retrieve_error.clone() {
            return Err(err);
        }

        state
            .intents
            .get(id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found("PaymentIntent"))
    }
}
