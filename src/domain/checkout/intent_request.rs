//! Payment intent request validation and construction.
//!
//! A caller's `{paymentMethodType, currency}` pair is validated into a
//! [`PaymentIntentRequest`], then expanded into the processor-ready
//! [`CreatePaymentIntentParams`] with the configured amount.

use super::currency::Currency;
use super::errors::CheckoutError;
use super::payment_method::PaymentMethodType;

/// Validated checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    payment_method_type: PaymentMethodType,
    currency: Currency,
}

impl PaymentIntentRequest {
    /// Validates raw caller input.
    ///
    /// # Errors
    ///
    /// - `UnknownPaymentMethodType` - not a known method type
    /// - `InvalidCurrency` - not a three-letter code
    pub fn new(payment_method_type: &str, currency: &str) -> Result<Self, CheckoutError> {
        Ok(Self {
            payment_method_type: payment_method_type.parse()?,
            currency: currency.parse()?,
        })
    }

    pub fn payment_method_type(&self) -> PaymentMethodType {
        self.payment_method_type
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Builds the processor request for the given amount (minor units).
    pub fn into_params(self, amount: i64) -> CreatePaymentIntentParams {
        let acss_debit_mandate = match self.payment_method_type {
            PaymentMethodType::AcssDebit => Some(AcssDebitMandateOptions::default()),
            _ => None,
        };

        CreatePaymentIntentParams {
            amount,
            currency: self.currency,
            payment_method_types: self.payment_method_type.offered_types(),
            acss_debit_mandate,
        }
    }
}

/// Parameters for creating a payment intent at the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentIntentParams {
    /// Amount in the currency's minor unit.
    pub amount: i64,
    pub currency: Currency,
    pub payment_method_types: Vec<PaymentMethodType>,
    /// Mandate options, present only for ACSS debit.
    pub acss_debit_mandate: Option<AcssDebitMandateOptions>,
}

/// Mandate options required for Canadian pre-authorized debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcssDebitMandateOptions {
    pub payment_schedule: PaymentSchedule,
    pub transaction_type: TransactionType,
}

/// Mandate payment schedule. Checkout only collects one-off payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentSchedule {
    #[default]
    Sporadic,
}

impl PaymentSchedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentSchedule::Sporadic => "sporadic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionType {
    #[default]
    Personal,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Personal => "personal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Validation Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn new_accepts_known_type_and_currency() {
        let request = PaymentIntentRequest::new("card", "USD").unwrap();

        assert_eq!(request.payment_method_type(), PaymentMethodType::Card);
        assert_eq!(request.currency().as_str(), "usd");
    }

    #[test]
    fn new_rejects_unknown_type() {
        assert_eq!(
            PaymentIntentRequest::new("cash", "usd"),
            Err(CheckoutError::UnknownPaymentMethodType("cash".to_string()))
        );
    }

    #[test]
    fn new_rejects_bad_currency() {
        assert_eq!(
            PaymentIntentRequest::new("card", "usdollar"),
            Err(CheckoutError::InvalidCurrency("usdollar".to_string()))
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Params Construction Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn card_request_has_no_mandate() {
        let params = PaymentIntentRequest::new("card", "usd")
            .unwrap()
            .into_params(5999);

        assert_eq!(params.amount, 5999);
        assert_eq!(params.currency.as_str(), "usd");
        assert_eq!(params.payment_method_types, vec![PaymentMethodType::Card]);
        assert!(params.acss_debit_mandate.is_none());
    }

    #[test]
    fn acss_debit_request_includes_sporadic_personal_mandate() {
        let params = PaymentIntentRequest::new("acss_debit", "cad")
            .unwrap()
            .into_params(5999);

        assert_eq!(params.payment_method_types, vec![PaymentMethodType::AcssDebit]);
        assert_eq!(
            params.acss_debit_mandate,
            Some(AcssDebitMandateOptions {
                payment_schedule: PaymentSchedule::Sporadic,
                transaction_type: TransactionType::Personal,
            })
        );
    }

    #[test]
    fn link_request_offers_link_and_card() {
        let params = PaymentIntentRequest::new("link", "usd")
            .unwrap()
            .into_params(100);

        assert_eq!(
            params.payment_method_types,
            vec![PaymentMethodType::Link, PaymentMethodType::Card]
        );
        assert!(params.acss_debit_mandate.is_none());
    }
}
