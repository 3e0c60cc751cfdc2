//! Payment method types accepted at checkout.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;

/// Payment method type, named as the processor names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Card,
    /// Canadian pre-authorized debit. Requires mandate options.
    AcssDebit,
    /// One-click checkout. Always offered together with card.
    Link,
    UsBankAccount,
    AuBecsDebit,
    BacsDebit,
    SepaDebit,
    Bancontact,
    Blik,
    Eps,
    Fpx,
    Giropay,
    Grabpay,
    Ideal,
    P24,
    Sofort,
    Affirm,
    AfterpayClearpay,
    Klarna,
    Alipay,
    WechatPay,
    Boleto,
    Oxxo,
    Konbini,
    Paynow,
    Promptpay,
    CustomerBalance,
}

impl PaymentMethodType {
    /// Every known method type.
    pub const ALL: [PaymentMethodType; 27] = [
        PaymentMethodType::Card,
        PaymentMethodType::AcssDebit,
        PaymentMethodType::Link,
        PaymentMethodType::UsBankAccount,
        PaymentMethodType::AuBecsDebit,
        PaymentMethodType::BacsDebit,
        PaymentMethodType::SepaDebit,
        PaymentMethodType::Bancontact,
        PaymentMethodType::Blik,
        PaymentMethodType::Eps,
        PaymentMethodType::Fpx,
        PaymentMethodType::Giropay,
        PaymentMethodType::Grabpay,
        PaymentMethodType::Ideal,
        PaymentMethodType::P24,
        PaymentMethodType::Sofort,
        PaymentMethodType::Affirm,
        PaymentMethodType::AfterpayClearpay,
        PaymentMethodType::Klarna,
        PaymentMethodType::Alipay,
        PaymentMethodType::WechatPay,
        PaymentMethodType::Boleto,
        PaymentMethodType::Oxxo,
        PaymentMethodType::Konbini,
        PaymentMethodType::Paynow,
        PaymentMethodType::Promptpay,
        PaymentMethodType::CustomerBalance,
    ];

    /// Returns the processor's identifier for this method type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodType::Card => "card",
            PaymentMethodType::AcssDebit => "acss_debit",
            PaymentMethodType::Link => "link",
            PaymentMethodType::UsBankAccount => "us_bank_account",
            PaymentMethodType::AuBecsDebit => "au_becs_debit",
            PaymentMethodType::BacsDebit => "bacs_debit",
            PaymentMethodType::SepaDebit => "sepa_debit",
            PaymentMethodType::Bancontact => "bancontact",
            PaymentMethodType::Blik => "blik",
            PaymentMethodType::Eps => "eps",
            PaymentMethodType::Fpx => "fpx",
            PaymentMethodType::Giropay => "giropay",
            PaymentMethodType::Grabpay => "grabpay",
            PaymentMethodType::Ideal => "ideal",
            PaymentMethodType::P24 => "p24",
            PaymentMethodType::Sofort => "sofort",
            PaymentMethodType::Affirm => "affirm",
            PaymentMethodType::AfterpayClearpay => "afterpay_clearpay",
            PaymentMethodType::Klarna => "klarna",
            PaymentMethodType::Alipay => "alipay",
            PaymentMethodType::WechatPay => "wechat_pay",
            PaymentMethodType::Boleto => "boleto",
            PaymentMethodType::Oxxo => "oxxo",
            PaymentMethodType::Konbini => "konbini",
            PaymentMethodType::Paynow => "paynow",
            PaymentMethodType::Promptpay => "promptpay",
            PaymentMethodType::CustomerBalance => "customer_balance",
        }
    }

    /// Method types to offer on the intent for this selection.
    pub fn offered_types(&self) -> Vec<PaymentMethodType> {
        match self {
            PaymentMethodType::Link => vec![PaymentMethodType::Link, PaymentMethodType::Card],
            other => vec![*other],
        }
    }
}

impl FromStr for PaymentMethodType {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethodType::ALL
            .iter()
            .find(|method| method.as_str() == s)
            .copied()
            .ok_or_else(|| CheckoutError::UnknownPaymentMethodType(s.to_string()))
    }
}

impl std::fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
