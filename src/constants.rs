//! # Constants
//!
//! Shared constants used throughout the notifier.
//!
//! These values represent reasonable defaults and can be overridden via
//! environment variables where applicable (see [`crate::config`]).

/// Default New Relic REST API base URL
pub const DEFAULT_API_ENDPOINT: &str = "https://api.newrelic.com";

/// Default timeout applied to each outbound HTTP call (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default log level when neither `RUST_LOG` nor the crate variable is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Header carrying the New Relic REST API key
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Environment variable overriding the API base URL (mock servers, EU region)
pub const ENV_API_ENDPOINT: &str = "NEWRELIC_API_ENDPOINT";

/// Environment variable overriding the HTTP timeout
pub const ENV_HTTP_TIMEOUT_SECS: &str = "NEWRELIC_HTTP_TIMEOUT_SECS";

/// Environment variable selecting the crate log level
pub const ENV_LOG_LEVEL: &str = "NEWRELIC_DEPLOYMENT_LOG_LEVEL";

/// Prefix of host-private keys in a module args file
pub const HOST_PRIVATE_KEY_PREFIX: &str = "_ansible_";

/// Host-private key that requests check (dry-run) mode
pub const HOST_CHECK_MODE_KEY: &str = "_ansible_check_mode";
