//! Tracing subscriber setup.

use std::io::{stdout, IsTerminal};

use tracing_subscriber::EnvFilter;

use crate::config::{Environment, ServerConfig};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter. Output is JSON in production
/// or when stdout is not a terminal, human-readable otherwise.
///
/// Must be called once, before anything logs.
pub fn init_tracing(server: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if use_json(&server.environment, stdout().is_terminal()) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }

    tracing::info!(
        log_level = %server.log_level,
        environment = ?server.environment,
        "Logging initialized"
    );
}

fn use_json(environment: &Environment, is_terminal: bool) -> bool {
    *environment == Environment::Production || !is_terminal
}
