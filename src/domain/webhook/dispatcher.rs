//! Event dispatcher - routes typed events to handlers by event type.
//!
//! Handlers are registered once at startup under the exact event type string
//! they process. Event types with no handler are acknowledged without error:
//! the processor sends far more types than this service acts on.
//!
//! ## Idempotency
//!
//! The processor may redeliver an event (timeouts, retries). The dispatcher
//! does not deduplicate by event id; every handler must be safe to run more
//! than once for the same `event.id` with no additional visible effect.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;

use super::event::TypedEvent;

/// Failure reported by a webhook event handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Logged, and the webhook is still acknowledged.
    #[error("Handler failed (non-fatal): {0}")]
    NonFatal(String),

    /// Surfaced as a server error so the processor redelivers the event.
    #[error("Handler failed (fatal): {0}")]
    Fatal(String),
}

impl HandlerError {
    pub fn non_fatal(message: impl Into<String>) -> Self {
        Self::NonFatal(message.into())
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal(message.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, HandlerError::Fatal(_))
    }
}

/// Handler for one or more webhook event types.
///
/// Implementations must be idempotent per `event.id`.
#[async_trait]
pub trait WebhookEventHandler: Send + Sync {
    /// Handles the event.
    async fn handle(&self, event: &TypedEvent) -> Result<(), HandlerError>;
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered handler processed the event.
    Handled,

    /// No handler is registered for the event type; no action taken.
    Acknowledged,

    /// The registered handler failed.
    HandlerFailed(HandlerError),
}

impl DispatchOutcome {
    /// Maps the outcome to the HTTP status returned to the processor.
    ///
    /// - 2xx: event acknowledged, no retry
    /// - 5xx: fatal handler failure, processor will retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchOutcome::Handled | DispatchOutcome::Acknowledged => StatusCode::OK,
            DispatchOutcome::HandlerFailed(err) if err.is_fatal() => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DispatchOutcome::HandlerFailed(_) => StatusCode::OK,
        }
    }
}

/// Routes events to handlers by exact event type.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: HashMap<String, Arc<dyn WebhookEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for an event type, replacing any previous one.
    pub fn register(
        &mut self,
        event_type: impl Into<String>,
        handler: Arc<dyn WebhookEventHandler>,
    ) {
        self.handlers.insert(event_type.into(), handler);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_handler(
        mut self,
        event_type: impl Into<String>,
        handler: Arc<dyn WebhookEventHandler>,
    ) -> Self {
        self.register(event_type, handler);
        self
    }

    /// Finds the handler registered for an event type.
    pub fn get_handler(&self, event_type: &str) -> Option<&dyn WebhookEventHandler> {
        self.handlers.get(event_type).map(|handler| handler.as_ref())
    }

    /// Event types with a registered handler, sorted.
    pub fn registered_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Dispatches an event to its handler.
    pub async fn dispatch(&self, event: &TypedEvent) -> DispatchOutcome {
        match self.get_handler(&event.event_type) {
            Some(handler) => match handler.handle(event).await {
                Ok(()) => DispatchOutcome::Handled,
                Err(err) => DispatchOutcome::HandlerFailed(err),
            },
            None => DispatchOutcome::Acknowledged,
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("event_types", &self.registered_types())
            .finish()
    }
}
