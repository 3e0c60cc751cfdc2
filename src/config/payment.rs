//! Payment configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (sk_...)
    pub secret_key: SecretString,

    /// Stripe publishable key (pk_...), handed to the checkout page
    pub publishable_key: String,

    /// Stripe webhook signing secret (whsec_...)
    pub webhook_secret: SecretString,

    /// Maximum accepted webhook age in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: u64,

    /// Amount charged per payment intent, in minor units
    #[serde(default = "default_intent_amount")]
    pub intent_amount: i64,

    /// Stripe API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.expose_secret().starts_with("sk_live_")
    }

    pub fn webhook_tolerance(&self) -> Duration {
        Duration::from_secs(self.webhook_tolerance_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret_key = self.secret_key.expose_secret();
        let webhook_secret = self.webhook_secret.expose_secret();

        if secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__SECRET_KEY"));
        }
        if self.publishable_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PUBLISHABLE_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !secret_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.publishable_key.starts_with("pk_") {
            return Err(ValidationError::InvalidStripePublishableKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        let publishable_test = self.publishable_key.starts_with("pk_test_");
        let publishable_live = self.publishable_key.starts_with("pk_live_");
        if (self.is_test_mode() && publishable_live) || (self.is_live_mode() && publishable_test) {
            return Err(ValidationError::StripeModeMismatch);
        }

        if self.webhook_tolerance_secs == 0 {
            return Err(ValidationError::InvalidWebhookTolerance);
        }
        if self.intent_amount <= 0 {
            return Err(ValidationError::InvalidIntentAmount);
        }
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(ValidationError::InvalidApiBaseUrl);
        }

        Ok(())
    }
}

fn default_webhook_tolerance() -> u64 {
    300
}

fn default_intent_amount() -> i64 {
    5999
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}
