//! CreatePaymentIntentHandler - Command handler for starting a checkout payment.

use std::sync::Arc;

use crate::domain::checkout::{CheckoutError, PaymentIntentRequest};
use crate::ports::PaymentGateway;

/// Command to create a payment intent.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub payment_method_type: String,
    pub currency: String,
}

/// Result of successful intent creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentIntentResult {
    pub payment_intent_id: String,
    pub client_secret: String,
}

/// Handler for creating payment intents.
///
/// Validates the caller's selection, builds the processor request with the
/// configured amount and returns the client secret. Nothing is stored.
pub struct CreatePaymentIntentHandler {
    gateway: Arc<dyn PaymentGateway>,
    amount: i64,
}

impl CreatePaymentIntentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, amount: i64) -> Self {
        Self { gateway, amount }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, CheckoutError> {
        // 1. Validate before anything reaches the gateway
        let request = PaymentIntentRequest::new(&cmd.payment_method_type, &cmd.currency)?;

        // 2. Create the intent
        let intent = self
            .gateway
            .create_payment_intent(request.into_params(self.amount))
            .await
            .map_err(|err| {
                tracing::error!(
                    error = %err,
                    processor_code = ?err.processor_code,
                    "Payment intent creation failed"
                );
                CheckoutError::Gateway(err)
            })?;

        // 3. The client cannot continue without a secret
        let client_secret = intent
            .client_secret
            .ok_or_else(|| CheckoutError::MissingClientSecret(intent.id.clone()))?;

        tracing::info!(payment_intent_id = %intent.id, "Payment intent created");

        Ok(CreatePaymentIntentResult {
            payment_intent_id: intent.id,
            client_secret,
        })
    }
}
