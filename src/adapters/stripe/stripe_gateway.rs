//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Stripe REST API with
//! form-encoded requests and basic auth.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(secret_key).with_base_url("http://localhost:12111");
//! let gateway = StripeGateway::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::checkout::CreatePaymentIntentParams;
use crate::ports::{GatewayError, GatewayErrorCode, PaymentGateway, PaymentIntent};

use super::api_types::{StripeErrorResponse, StripePaymentIntent};

/// Default Stripe API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

const USER_AGENT: &str = concat!("checkout-relay/", env!("CARGO_PKG_VERSION"));

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    secret_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Per-request timeout for API calls.
    timeout: Duration,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            secret_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API base URL (stripe-mock, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Stripe payment gateway.
pub struct StripeGateway {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway with the given configuration.
    pub fn new(config: StripeConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Form fields for `POST /v1/payment_intents`.
    pub fn form_params(params: &CreatePaymentIntentParams) -> Vec<(String, String)> {
        let mut form = vec![
            ("amount".to_string(), params.amount.to_string()),
            ("currency".to_string(), params.currency.as_str().to_string()),
        ];

        for (index, method) in params.payment_method_types.iter().enumerate() {
            form.push((
                format!("payment_method_types[{}]", index),
                method.as_str().to_string(),
            ));
        }

        if let Some(mandate) = &params.acss_debit_mandate {
            form.push((
                "payment_method_options[acss_debit][mandate_options][payment_schedule]".to_string(),
                mandate.payment_schedule.as_str().to_string(),
            ));
            form.push((
                "payment_method_options[acss_debit][mandate_options][transaction_type]".to_string(),
                mandate.transaction_type.as_str().to_string(),
            ));
        }

        form
    }

    /// URL of a single payment intent.
    ///
    /// The id is pushed as one path segment, so `/`, `?` and `#` in caller
    /// input are percent-encoded instead of changing the request path.
    fn intent_url(&self, id: &str) -> Result<reqwest::Url, GatewayError> {
        let invalid_base = || {
            GatewayError::new(
                GatewayErrorCode::InvalidRequest,
                format!("Invalid Stripe base URL: {}", self.config.api_base_url),
            )
        };

        let mut url = reqwest::Url::parse(&self.config.api_base_url).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .extend(["v1", "payment_intents", id]);
        Ok(url)
    }

    /// Reads a payment intent or a classified error from a Stripe response.
    async fn read_intent(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<PaymentIntent, GatewayError> {
        let status = response.status();

        if status.is_success() {
            let intent: StripePaymentIntent = response.json().await.map_err(|e| {
                GatewayError::new(
                    GatewayErrorCode::Processor,
                    format!("Failed to parse Stripe response: {}", e),
                )
            })?;
            return Ok(intent.into());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            operation,
            status = status.as_u16(),
            error = %body,
            "Stripe request failed"
        );

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::not_found("PaymentIntent"));
        }

        match serde_json::from_str::<StripeErrorResponse>(&body) {
            Ok(parsed) => Err(parsed.error.into()),
            Err(_) => Err(GatewayError::new(
                GatewayErrorCode::Processor,
                format!("Stripe API error ({}): {}", status, body),
            )),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        params: CreatePaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .form(&Self::form_params(&params))
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        Self::read_intent(response, "create_payment_intent").await
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, GatewayError> {
        let url = self.intent_url(id)?;

        let response = self
            .http_client
            .get(url)
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        Self::read_intent(response, "retrieve_payment_intent").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::PaymentIntentRequest;
    use crate::ports::PaymentIntentStatus;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::routing::{get, post};
    use axum::{Form, Json, Router};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn params(method: &str) -> CreatePaymentIntentParams {
        PaymentIntentRequest::new(method, "usd")
            .unwrap()
            .into_params(5999)
    }

    fn form_value<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Form Encoding Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn card_form_has_amount_currency_and_type() {
        let form = StripeGateway::form_params(&params("card"));

        assert_eq!(form_value(&form, "amount"), Some("5999"));
        assert_eq!(form_value(&form, "currency"), Some("usd"));
        assert_eq!(form_value(&form, "payment_method_types[0]"), Some("card"));
        assert_eq!(form.len(), 3);
    }

    #[test]
    fn link_form_lists_link_then_card() {
        let form = StripeGateway::form_params(&params("link"));

        assert_eq!(form_value(&form, "payment_method_types[0]"), Some("link"));
        assert_eq!(form_value(&form, "payment_method_types[1]"), Some("card"));
    }

    #[test]
    fn acss_debit_form_has_mandate_options() {
        let form = StripeGateway::form_params(&params("acss_debit"));

        assert_eq!(
            form_value(
                &form,
                "payment_method_options[acss_debit][mandate_options][payment_schedule]"
            ),
            Some("sporadic")
        );
        assert_eq!(
            form_value(
                &form,
                "payment_method_options[acss_debit][mandate_options][transaction_type]"
            ),
            Some("personal")
        );
    }

    #[test]
    fn config_debug_redacts_key() {
        let config = StripeConfig::new(SecretString::new("sk_test_secret".to_string()));
        assert!(!format!("{:?}", config).contains("sk_test_secret"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = StripeConfig::new(SecretString::new("sk_test_x".to_string()))
            .with_base_url("http://localhost:12111/");
        assert_eq!(config.api_base_url, "http://localhost:12111");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // HTTP Tests (local fake Stripe)
    // ════════════════════════════════════════════════════════════════════════════

    async fn fake_create(
        headers: HeaderMap,
        Form(form): Form<HashMap<String, String>>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        // "sk_test_valid:" base64-encoded
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Basic c2tfdGVzdF92YWxpZDo=");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": {
                    "type": "authentication_error",
                    "message": "Invalid API Key provided: sk_test_***"
                }})),
            );
        }

        if form.get("currency").map(String::as_str) == Some("xyz") {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": {
                    "type": "invalid_request_error",
                    "code": "parameter_invalid_empty",
                    "message": "Invalid currency: xyz"
                }})),
            );
        }

        (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": "pi_fake_1",
                "object": "payment_intent",
                "client_secret": "pi_fake_1_secret_abc",
                "status": "requires_payment_method",
                "amount": form.get("amount").and_then(|a| a.parse::<i64>().ok()),
                "currency": form.get("currency"),
            })),
        )
    }

    async fn fake_retrieve(Path(id): Path<String>) -> (StatusCode, Json<serde_json::Value>) {
        if id != "pi_fake_1" {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": {
                    "type": "invalid_request_error",
                    "code": "resource_missing",
                    "message": format!("No such payment_intent: '{}'", id)
                }})),
            );
        }
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": "pi_fake_1",
                "client_secret": "pi_fake_1_secret_abc",
                "status": "succeeded",
                "amount": 5999,
                "currency": "usd",
            })),
        )
    }

    async fn spawn_fake_stripe() -> String {
        let app = Router::new()
            .route("/v1/payment_intents", post(fake_create))
            .route("/v1/payment_intents/:id", get(fake_retrieve));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn gateway(base_url: &str, key: &str) -> StripeGateway {
        StripeGateway::new(
            StripeConfig::new(SecretString::new(key.to_string())).with_base_url(base_url),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_payment_intent_round_trip() {
        let base_url = spawn_fake_stripe().await;

        let intent = gateway(&base_url, "sk_test_valid")
            .create_payment_intent(params("card"))
            .await
            .unwrap();

        assert_eq!(intent.id, "pi_fake_1");
        assert_eq!(intent.client_secret.as_deref(), Some("pi_fake_1_secret_abc"));
        assert_eq!(intent.amount, 5999);
        assert_eq!(intent.currency, "usd");
    }

    #[tokio::test]
    async fn bad_key_is_authentication_error() {
        let base_url = spawn_fake_stripe().await;

        let err = gateway(&base_url, "sk_test_wrong")
            .create_payment_intent(params("card"))
            .await
            .unwrap_err();

        assert_eq!(err.code, GatewayErrorCode::Authentication);
    }

    #[tokio::test]
    async fn invalid_request_keeps_processor_code() {
        let base_url = spawn_fake_stripe().await;
        let mut bad = params("card");
        bad.currency = "xyz".parse().unwrap();

        let err = gateway(&base_url, "sk_test_valid")
            .create_payment_intent(bad)
            .await
            .unwrap_err();

        assert_eq!(err.code, GatewayErrorCode::InvalidRequest);
        assert_eq!(err.processor_code.as_deref(), Some("parameter_invalid_empty"));
    }

    #[tokio::test]
    async fn retrieve_payment_intent_reads_status() {
        let base_url = spawn_fake_stripe().await;

        let intent = gateway(&base_url, "sk_test_valid")
            .retrieve_payment_intent("pi_fake_1")
            .await
            .unwrap();

        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);
    }

    #[tokio::test]
    async fn retrieve_missing_intent_is_not_found() {
        let base_url = spawn_fake_stripe().await;

        let err = gateway(&base_url, "sk_test_valid")
            .retrieve_payment_intent("pi_missing")
            .await
            .unwrap_err();

        assert_eq!(err.code, GatewayErrorCode::NotFound);
    }

    #[test]
    fn intent_url_keeps_base_path() {
        let gw = gateway("http://localhost:12111/stripe/", "sk_test_valid");

        let url = gw.intent_url("pi_123").unwrap();

        assert_eq!(url.as_str(), "http://localhost:12111/stripe/v1/payment_intents/pi_123");
    }

    #[tokio::test]
    async fn retrieve_escapes_id_into_single_path_segment() {
        let seen: Arc<Mutex<Vec<Uri>>> = Arc::default();
        let recorder = seen.clone();
        let app = Router::new().fallback(move |uri: Uri| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(uri);
                StatusCode::NOT_FOUND
            }
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let gw = gateway(&format!("http://{}", addr), "sk_test_valid");

        for id in ["../../v1/customers/cus_123", "pi_1?expand[]=customer", "pi_1#frag"] {
            let err = gw.retrieve_payment_intent(id).await.unwrap_err();
            assert_eq!(err.code, GatewayErrorCode::NotFound);
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        for uri in seen.iter() {
            assert!(uri.query().is_none(), "query leaked: {}", uri);
            let segments: Vec<&str> = uri.path().trim_start_matches('/').split('/').collect();
            assert_eq!(segments.len(), 3, "path escaped: {}", uri);
            assert_eq!(&segments[..2], &["v1", "payment_intents"]);
        }
        assert_eq!(
            seen[0].path(),
            "/v1/payment_intents/..%2F..%2Fv1%2Fcustomers%2Fcus_123"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway(&format!("http://{}", addr), "sk_test_valid")
            .create_payment_intent(params("card"))
            .await
            .unwrap_err();

        assert_eq!(err.code, GatewayErrorCode::Network);
        assert!(err.is_retryable());
    }
}
