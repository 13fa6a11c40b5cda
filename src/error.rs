//! # Errors
//!
//! Failure taxonomy for a deployment notification run.
//!
//! Every variant is fatal for the invocation. Nothing is retried.

use std::fmt;
use thiserror::Error;

/// Which New Relic API call an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStage {
    /// `POST /v2/applications.json` name lookup
    ApplicationLookup,
    /// `POST /v2/applications/{id}/deployments.json`
    DeploymentCreate,
}

impl fmt::Display for ApiStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiStage::ApplicationLookup => f.write_str("look up newrelic application"),
            ApiStage::DeploymentCreate => f.write_str("update newrelic"),
        }
    }
}

/// Error type for a notification run
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Invalid or conflicting parameters, detected before any network call
    #[error("{0}")]
    Configuration(String),

    /// The HTTP call could not be completed (connect, timeout, TLS)
    #[error("unable to {stage}: {source}")]
    Transport {
        stage: ApiStage,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP call completed with a status other than the expected ones
    #[error("unable to {stage}: HTTP {status}: {body}")]
    UpstreamRejection {
        stage: ApiStage,
        status: u16,
        body: String,
    },

    /// The name lookup returned no application with exactly this name
    #[error("no newrelic application named '{app_name}' was found")]
    UnresolvedIdentifier { app_name: String },

    /// The response body did not have the expected shape
    #[error("unable to {stage}: unexpected response: {reason}")]
    InvalidResponse { stage: ApiStage, reason: String },
}

impl NotifyError {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        NotifyError::Configuration(msg.into())
    }

    /// True if the error was raised before any network call
    pub fn is_configuration(&self) -> bool {
        matches!(self, NotifyError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_rejection_message_carries_body() {
        let err = NotifyError::UpstreamRejection {
            stage: ApiStage::DeploymentCreate,
            status: 500,
            body: "Internal Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unable to update newrelic: HTTP 500: Internal Error"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_unresolved_identifier_names_the_application() {
        let err = NotifyError::UnresolvedIdentifier {
            app_name: "myapp".to_string(),
        };
        assert!(err.to_string().contains("'myapp'"));
    }
}
