//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::handlers::checkout::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, GetPaymentIntentHandler,
    GetPaymentIntentQuery,
};
use crate::domain::checkout::CheckoutError;
use crate::ports::PaymentGateway;

use super::dto::{
    ConfigResponse, CreatePaymentIntentRequest, CreatePaymentIntentResponse, ErrorResponse,
    PaymentNextQuery,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for checkout endpoints.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub publishable_key: String,
    /// Amount charged per intent, in minor units.
    pub intent_amount: i64,
}

impl CheckoutAppState {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        publishable_key: impl Into<String>,
        intent_amount: i64,
    ) -> Self {
        Self {
            gateway,
            publishable_key: publishable_key.into(),
            intent_amount,
        }
    }

    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(self.gateway.clone(), self.intent_amount)
    }

    pub fn get_payment_intent_handler(&self) -> GetPaymentIntentHandler {
        GetPaymentIntentHandler::new(self.gateway.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /config - Publishable key for the checkout page
pub async fn get_config(State(state): State<CheckoutAppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        publishable_key: state.publishable_key,
    })
}

/// POST /create-payment-intent - Create a payment intent and return its client secret
pub async fn create_payment_intent(
    State(state): State<CheckoutAppState>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let Json(request) = payload?;

    let handler = state.create_payment_intent_handler();
    let cmd = CreatePaymentIntentCommand {
        payment_method_type: request.payment_method_type,
        currency: request.currency,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: result.client_secret,
    }))
}

/// GET /payment/next - Processor return URL; forwards to the success page
pub async fn payment_next(
    State(state): State<CheckoutAppState>,
    Query(query): Query<PaymentNextQuery>,
) -> Result<Redirect, CheckoutApiError> {
    let payment_intent_id = query
        .payment_intent
        .ok_or(CheckoutError::MissingParameter("payment_intent"))?;

    let handler = state.get_payment_intent_handler();
    let client_secret = handler
        .client_secret(GetPaymentIntentQuery { payment_intent_id })
        .await?;

    // Client secrets are [A-Za-z0-9_], safe in a query string as-is.
    Ok(Redirect::to(&format!(
        "/success?payment_intent_client_secret={}",
        client_secret
    )))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
#[derive(Debug)]
pub enum CheckoutApiError {
    /// Body was not the expected JSON.
    InvalidBody(String),
    Checkout(CheckoutError),
}

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self::Checkout(err)
    }
}

impl From<JsonRejection> for CheckoutApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CheckoutApiError::InvalidBody(detail) => {
                (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", detail))
            }
            CheckoutApiError::Checkout(err) => (err.status_code(), err.public_message()),
        };

        tracing::warn!(error = ?self, status = status.as_u16(), "Checkout request rejected");

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
