//! Checkout Relay server entry point.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use checkout_relay::adapters::http::{app_router, CheckoutAppState, WebhookAppState};
use checkout_relay::adapters::stripe::{StripeConfig, StripeGateway};
use checkout_relay::application::{default_dispatcher, ProcessWebhookHandler};
use checkout_relay::config::AppConfig;
use checkout_relay::domain::webhook::WebhookVerifier;
use checkout_relay::telemetry::init_tracing;
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_validated()?;
    init_tracing(&config.server);

    let payment = &config.payment;
    tracing::info!(
        test_mode = payment.is_test_mode(),
        intent_amount = payment.intent_amount,
        "Starting checkout relay"
    );

    // Payment gateway
    let stripe_config = StripeConfig::new(payment.secret_key.clone())
        .with_base_url(payment.api_base_url.clone())
        .with_timeout(config.server.request_timeout());
    let gateway = Arc::new(StripeGateway::new(stripe_config)?);

    // Webhook pipeline
    let dispatcher = default_dispatcher();
    tracing::debug!(event_types = ?dispatcher.registered_types(), "Webhook handlers registered");
    let verifier = WebhookVerifier::new(
        payment.webhook_secret.expose_secret().clone(),
        payment.webhook_tolerance(),
    );
    let processor = ProcessWebhookHandler::new(verifier, Arc::new(dispatcher));

    let app = app_router(
        CheckoutAppState::new(gateway, payment.publishable_key.clone(), payment.intent_amount),
        WebhookAppState::new(processor),
    )
    .layer(TimeoutLayer::new(config.server.request_timeout()))
    .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
