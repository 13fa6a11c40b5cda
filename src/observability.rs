//! # Observability
//!
//! Tracing subscriber setup.
//!
//! Logs go to stderr: stdout is reserved for the JSON result read by the host.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::NotifierConfig;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `config.log_level`.
///
/// # Errors
/// Returns an error if a global subscriber is already installed
pub fn init_tracing(config: &NotifierConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level).into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

fn default_filter(log_level: &str) -> String {
    format!("newrelic_deployment={}", log_level.to_lowercase())
}
