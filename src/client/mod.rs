//! # New Relic API Client
//!
//! The notifier talks to New Relic through the [`NewRelicApi`] trait so the
//! HTTP layer can be swapped for a fake in tests.
//!
//! - `rest`: reqwest implementation against the REST API v2
//! - `requests`: outbound JSON payloads
//! - `responses`: inbound JSON payloads

mod requests;
mod responses;
mod rest;

pub use requests::*;
pub use responses::*;
pub use rest::NewRelicREST;

use async_trait::async_trait;

use crate::error::NotifyError;

/// Status and raw body of a completed HTTP call
///
/// The notifier decides what a status means; the client only reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operations the notifier needs from New Relic
///
/// Implementations return `Err` only for transport failures. Any HTTP status,
/// including 4xx/5xx, is returned as an [`ApiResponse`].
#[async_trait]
pub trait NewRelicApi: Send + Sync {
    /// `POST /v2/applications.json` filtered by application name
    async fn list_applications(
        &self,
        token: &str,
        app_name: &str,
    ) -> Result<ApiResponse, NotifyError>;

    /// `POST /v2/applications/{application_id}/deployments.json`
    async fn create_deployment(
        &self,
        token: &str,
        application_id: &str,
        body: &CreateDeploymentRequest,
    ) -> Result<ApiResponse, NotifyError>;
}
