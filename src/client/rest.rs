//! New Relic REST Client
//!
//! Native REST implementation for the New Relic REST API v2.
//! Uses reqwest with rustls (no OpenSSL dependencies).
//!
//! The base URL defaults to `https://api.newrelic.com` and can be pointed at a
//! Pact mock server through `NEWRELIC_API_ENDPOINT`.
//!
//! References:
//! - [Applications API](https://docs.newrelic.com/docs/apis/rest-api-v2/application-examples-v2/list-your-app-id-metric-data-v2/)
//! - [Deployments API](https://docs.newrelic.com/docs/apm/new-relic-apm/maintenance/record-monitor-deployments/)

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::requests::{CreateDeploymentRequest, APPLICATION_NAME_FILTER};
use super::{ApiResponse, NewRelicApi};
use crate::config::NotifierConfig;
use crate::constants::API_KEY_HEADER;
use crate::error::{ApiStage, NotifyError};

/// New Relic REST client
pub struct NewRelicREST {
    http_client: Client,
    base_url: String,
}

impl std::fmt::Debug for NewRelicREST {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewRelicREST")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl NewRelicREST {
    /// Create a REST client for one invocation
    ///
    /// Both calls of a run share this client and its timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &NotifierConfig, validate_certs: bool) -> Result<Self> {
        if !validate_certs {
            warn!("TLS certificate validation is disabled for New Relic API calls");
        }

        let http_client = Client::builder()
            .timeout(config.http_timeout())
            .danger_accept_invalid_certs(!validate_certs)
            .user_agent(concat!("newrelic-deployment/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        debug!(
            "Initialized New Relic REST client: endpoint={}, timeout={}s",
            config.api_endpoint, config.http_timeout_secs
        );

        Ok(Self {
            http_client,
            base_url: config.api_endpoint.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a POST request with the API key header
    fn make_request(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http_client.post(url).header(API_KEY_HEADER, token)
    }

    /// Send the request and collect status and body
    async fn execute(
        stage: ApiStage,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse, NotifyError> {
        let response = request
            .send()
            .await
            .map_err(|source| NotifyError::Transport { stage, source })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| NotifyError::Transport { stage, source })?;

        debug!("New Relic responded to '{}' with HTTP {}", stage, status);
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl NewRelicApi for NewRelicREST {
    async fn list_applications(
        &self,
        token: &str,
        app_name: &str,
    ) -> Result<ApiResponse, NotifyError> {
        let request = self
            .make_request("v2/applications.json", token)
            .form(&[(APPLICATION_NAME_FILTER, app_name)]);
        Self::execute(ApiStage::ApplicationLookup, request).await
    }

    async fn create_deployment(
        &self,
        token: &str,
        application_id: &str,
        body: &CreateDeploymentRequest,
    ) -> Result<ApiResponse, NotifyError> {
        let path = format!("v2/applications/{application_id}/deployments.json");
        // .json() sets Content-Type: application/json
        let request = self.make_request(&path, token).json(body);
        Self::execute(ApiStage::DeploymentCreate, request).await
    }
}
