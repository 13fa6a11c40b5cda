//! # Transport Error Tests
//!
//! Calls that never reach New Relic surface as `NotifyError::Transport`
//! tagged with the stage that failed.

#[cfg(test)]
mod common;

use common::{client_for, init_rustls};
use newrelic_deployment::{
    ApiStage, DeploymentNotifier, DeploymentParams, NewRelicApi, NotifyError, RunMode,
};

// Port 1 (tcpmux) is not listening on test hosts; connections are refused
const CLOSED_ENDPOINT: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn test_lookup_connection_refused_is_transport_error() {
    init_rustls();
    let client = client_for(CLOSED_ENDPOINT);

    let err = client
        .list_applications("test-api-key", "myapp")
        .await
        .expect_err("connection to a closed port must fail");

    assert!(
        matches!(
            err,
            NotifyError::Transport {
                stage: ApiStage::ApplicationLookup,
                ..
            }
        ),
        "expected lookup transport error, got {err:?}"
    );
    assert!(
        err.to_string()
            .starts_with("unable to look up newrelic application"),
        "message should name the failed stage: {err}"
    );
}

#[tokio::test]
async fn test_deployment_connection_refused_is_transport_error() {
    init_rustls();
    let notifier = DeploymentNotifier::new(client_for(CLOSED_ENDPOINT));

    let request = DeploymentParams {
        token: Some("test-api-key".to_string()),
        application_id: Some("123".to_string()),
        ..DeploymentParams::default()
    }
    .validate()
    .expect("valid parameters");

    let err = notifier
        .notify(&request, RunMode::Apply)
        .await
        .expect_err("connection to a closed port must fail");

    assert!(
        matches!(
            err,
            NotifyError::Transport {
                stage: ApiStage::DeploymentCreate,
                ..
            }
        ),
        "expected deployment transport error, got {err:?}"
    );
    assert!(err.to_string().starts_with("unable to update newrelic"));
}
