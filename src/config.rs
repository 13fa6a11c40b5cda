//! # Notifier Configuration
//!
//! Process-level settings loaded from environment variables.

use std::time::Duration;

use crate::constants::{
    DEFAULT_API_ENDPOINT, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOG_LEVEL, ENV_API_ENDPOINT,
    ENV_HTTP_TIMEOUT_SECS, ENV_LOG_LEVEL,
};

/// Notifier-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// Per-invocation parameters (token, application, TLS verification) live on
/// [`crate::request::DeploymentRequest`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Base URL of the New Relic REST API, without trailing slash
    pub api_endpoint: String,
    /// Timeout applied to each outbound HTTP call (seconds)
    pub http_timeout_secs: u64,
    /// Crate log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl NotifierConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Split out from [`Self::from_env`] so tests don't have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_endpoint = lookup(ENV_API_ENDPOINT)
            .filter(|v| !v.trim().is_empty())
            .map_or_else(
                || DEFAULT_API_ENDPOINT.to_string(),
                |v| v.trim().trim_end_matches('/').to_string(),
            );

        Self {
            api_endpoint,
            http_timeout_secs: parse_timeout_secs(lookup(ENV_HTTP_TIMEOUT_SECS)),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Timeout as a [`Duration`]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Parse a timeout or fall back to the default
///
/// Zero would make every call time out immediately, so it counts as invalid.
fn parse_timeout_secs(raw: Option<String>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
}

/// Interpret a host-style boolean (`yes`/`no`, `true`/`false`, `on`/`off`, `1`/`0`)
///
/// Returns `None` when the value is not recognised.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "y" => Some(true),
        "false" | "no" | "off" | "0" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = NotifierConfig::from_lookup(|_| None);
        assert_eq!(config, NotifierConfig::default());
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_endpoint_override_strips_trailing_slash() {
        let config =
            NotifierConfig::from_lookup(lookup_from(&[(ENV_API_ENDPOINT, "http://127.0.0.1:9999/")]));
        assert_eq!(config.api_endpoint, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        let config =
            NotifierConfig::from_lookup(lookup_from(&[(ENV_HTTP_TIMEOUT_SECS, "soon")]));
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);

        let config = NotifierConfig::from_lookup(lookup_from(&[(ENV_HTTP_TIMEOUT_SECS, "5")]));
        assert_eq!(config.http_timeout_secs, 5);
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = NotifierConfig::from_lookup(lookup_from(&[(ENV_HTTP_TIMEOUT_SECS, "0")]));
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_bool_accepts_host_forms() {
        for raw in ["yes", "YES", "true", "On", "1"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw} should be true");
        }
        for raw in ["no", "False", "off", "0"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw} should be false");
        }
        assert_eq!(parse_bool("maybe"), None);
    }
}
