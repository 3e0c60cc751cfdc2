//! GetPaymentIntentHandler - Query handler for the post-payment redirect.

use std::sync::Arc;

use crate::domain::checkout::CheckoutError;
use crate::ports::{PaymentGateway, PaymentIntent};

/// Query for a payment intent by processor id.
#[derive(Debug, Clone)]
pub struct GetPaymentIntentQuery {
    pub payment_intent_id: String,
}

/// Handler for looking up a payment intent.
pub struct GetPaymentIntentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl GetPaymentIntentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, query: GetPaymentIntentQuery) -> Result<PaymentIntent, CheckoutError> {
        let id = query.payment_intent_id.trim();
        if id.is_empty() {
            return Err(CheckoutError::MissingParameter("payment_intent"));
        }

        self.gateway.retrieve_payment_intent(id).await.map_err(|err| {
            tracing::warn!(payment_intent_id = %id, error = %err, "Payment intent lookup failed");
            CheckoutError::Gateway(err)
        })
    }

    /// Looks up the intent and returns its client secret.
    pub async fn client_secret(&self, query: GetPaymentIntentQuery) -> Result<String, CheckoutError> {
        let intent = self.handle(query).await?;
        intent
            .client_secret
            .ok_or(CheckoutError::MissingClientSecret(intent.id))
    }
}
