//! # Deployment Notifier
//!
//! Resolves the target application and records a deployment marker in New Relic.
//!
//! The flow is strictly sequential:
//! 1. Resolve the application id (lookup by name, or use the given id)
//! 2. Stop here in check mode
//! 3. Create the deployment and interpret the status

use tracing::{debug, info, info_span, Instrument};

use crate::client::{ApplicationListResponse, CreateDeploymentRequest, NewRelicApi};
use crate::error::{ApiStage, NotifyError};
use crate::request::{AppTarget, DeploymentRequest};

/// Whether the run may modify New Relic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Create the deployment marker
    #[default]
    Apply,
    /// Report what would change without creating anything
    CheckOnly,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub changed: bool,
    pub application_id: String,
    pub check_only: bool,
}

/// Sends deployment notifications through an injected [`NewRelicApi`]
#[derive(Debug)]
pub struct DeploymentNotifier<A> {
    api: A,
}

impl<A: NewRelicApi> DeploymentNotifier<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Access the underlying API client
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one notification
    ///
    /// # Errors
    /// - [`NotifyError::UnresolvedIdentifier`] if no application has exactly `app_name`
    /// - [`NotifyError::UpstreamRejection`] if New Relic answers with an unexpected status
    /// - [`NotifyError::Transport`] if a call cannot be completed
    /// - [`NotifyError::InvalidResponse`] if the lookup body cannot be parsed
    pub async fn notify(
        &self,
        request: &DeploymentRequest,
        mode: RunMode,
    ) -> Result<DeploymentOutcome, NotifyError> {
        let span = info_span!(
            "newrelic.deployment",
            app = ?request.target(),
            revision = %request.revision(),
            appname = %request.appname(),
            environment = %request.environment(),
            check_only = (mode == RunMode::CheckOnly),
        );

        async move {
            let application_id = self.resolve_application_id(request).await?;

            if mode == RunMode::CheckOnly {
                info!(
                    "Check mode: would record deployment for application {}",
                    application_id
                );
                return Ok(DeploymentOutcome {
                    changed: true,
                    application_id,
                    check_only: true,
                });
            }

            self.create_deployment(request, &application_id).await?;

            Ok(DeploymentOutcome {
                changed: true,
                application_id,
                check_only: false,
            })
        }
        .instrument(span)
        .await
    }

    /// Resolve the target to a New Relic application id
    ///
    /// Lookup is read-only, so it also runs in check mode.
    ///
    /// # Errors
    /// See [`Self::notify`]
    pub async fn resolve_application_id(
        &self,
        request: &DeploymentRequest,
    ) -> Result<String, NotifyError> {
        let app_name = match request.target() {
            AppTarget::Id(id) => return Ok(id.clone()),
            AppTarget::Name(name) => name,
        };

        debug!("Looking up New Relic application id for '{}'", app_name);
        let response = self
            .api
            .list_applications(request.token(), app_name)
            .await?;

        if !response.is_success() {
            return Err(NotifyError::UpstreamRejection {
                stage: ApiStage::ApplicationLookup,
                status: response.status,
                body: response.body,
            });
        }

        let listing: ApplicationListResponse =
            serde_json::from_str(&response.body).map_err(|e| NotifyError::InvalidResponse {
                stage: ApiStage::ApplicationLookup,
                reason: e.to_string(),
            })?;

        let id = listing
            .find_id(app_name)
            .ok_or_else(|| NotifyError::UnresolvedIdentifier {
                app_name: app_name.clone(),
            })?;

        info!("Resolved New Relic application '{}' to id {}", app_name, id);
        Ok(id)
    }

    async fn create_deployment(
        &self,
        request: &DeploymentRequest,
        application_id: &str,
    ) -> Result<(), NotifyError> {
        let body = CreateDeploymentRequest::from(request);
        let response = self
            .api
            .create_deployment(request.token(), application_id, &body)
            .await?;

        match response.status {
            200 | 201 => {
                info!(
                    "Recorded deployment for application {} (HTTP {})",
                    application_id, response.status
                );
                Ok(())
            }
            status => Err(NotifyError::UpstreamRejection {
                stage: ApiStage::DeploymentCreate,
                status,
                body: response.body,
            }),
        }
    }
}
