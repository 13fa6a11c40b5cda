//! Common test utilities for Pact contract tests
//!
//! Provides rustls crypto provider setup and a REST client pointed at the
//! mock server.

use newrelic_deployment::{NewRelicREST, NotifierConfig};
use std::sync::Once;

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` to ensure it's only called once across all tests.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        // We use ring as the crypto provider (matches main application)
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    });
}

/// Build a REST client whose base URL is the mock server URL
pub fn client_for(mock_url: &str) -> NewRelicREST {
    let config = NotifierConfig {
        api_endpoint: mock_url.trim_end_matches('/').to_string(),
        ..NotifierConfig::default()
    };
    NewRelicREST::new(&config, true).expect("Failed to create REST client")
}
