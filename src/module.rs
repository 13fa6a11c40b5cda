//! # Host Module Protocol
//!
//! The configuration-management host runs the binary with the path of a JSON
//! args file and reads a JSON result from stdout.
//!
//! ```json
//! {"token": "AAAAAA", "app_name": "myapp", "revision": "1.0", "_ansible_check_mode": false}
//! ```
//!
//! Result on stdout:
//!
//! ```json
//! {"changed": true, "failed": false, "application_id": "42"}
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, error};

use crate::client::NewRelicApi;
use crate::config::parse_bool;
use crate::constants::{HOST_CHECK_MODE_KEY, HOST_PRIVATE_KEY_PREFIX};
use crate::error::NotifyError;
use crate::notifier::{DeploymentNotifier, DeploymentOutcome, RunMode};
use crate::request::{DeploymentParams, DeploymentRequest};

/// Parameters plus run mode for one invocation
#[derive(Debug, Clone, Default)]
pub struct ModuleInvocation {
    pub params: DeploymentParams,
    pub mode: RunMode,
}

/// JSON result reported back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleResult {
    pub changed: bool,
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

impl ModuleResult {
    pub fn success(outcome: DeploymentOutcome) -> Self {
        Self {
            changed: outcome.changed,
            failed: false,
            msg: None,
            application_id: Some(outcome.application_id),
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            changed: false,
            failed: true,
            msg: Some(msg.into()),
            application_id: None,
        }
    }

    /// Process exit status for this result
    pub fn exit_code(&self) -> i32 {
        i32::from(self.failed)
    }

    /// Serialize for stdout
    pub fn to_json(&self) -> String {
        // A struct of bools and strings always serializes
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"changed":false,"failed":true,"msg":"unable to serialize result"}"#.to_string()
        })
    }
}

impl From<Result<DeploymentOutcome, NotifyError>> for ModuleResult {
    fn from(result: Result<DeploymentOutcome, NotifyError>) -> Self {
        match result {
            Ok(outcome) => ModuleResult::success(outcome),
            Err(e) => ModuleResult::failure(e.to_string()),
        }
    }
}

/// Read and parse a host args file
///
/// # Errors
/// Returns [`NotifyError::Configuration`] if the file cannot be read or parsed
pub fn load_args(path: &Path) -> Result<ModuleInvocation, NotifyError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        NotifyError::config(format!(
            "unable to read module arguments from {}: {e}",
            path.display()
        ))
    })?;
    parse_args(&raw)
}

/// Parse host args JSON
///
/// Host-private `_ansible_*` keys are dropped; `_ansible_check_mode` selects
/// [`RunMode::CheckOnly`]. Any other unknown key is rejected.
///
/// # Errors
/// Returns [`NotifyError::Configuration`] on malformed JSON or parameters
pub fn parse_args(raw: &str) -> Result<ModuleInvocation, NotifyError> {
    let mut map: Map<String, Value> = serde_json::from_str(raw)
        .map_err(|e| NotifyError::config(format!("module arguments are not a JSON object: {e}")))?;

    let check_mode = match map.remove(HOST_CHECK_MODE_KEY) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => parse_bool(&s).ok_or_else(|| {
            NotifyError::config(format!("'{s}' is not a valid value for {HOST_CHECK_MODE_KEY}"))
        })?,
        Some(other) => {
            return Err(NotifyError::config(format!(
                "'{other}' is not a valid value for {HOST_CHECK_MODE_KEY}"
            )))
        }
    };

    let before = map.len();
    map.retain(|key, _| !key.starts_with(HOST_PRIVATE_KEY_PREFIX));
    debug!("Ignored {} host-private argument(s)", before - map.len());

    let params: DeploymentParams = serde_json::from_value(Value::Object(map))
        .map_err(|e| NotifyError::config(format!("invalid module arguments: {e}")))?;

    Ok(ModuleInvocation {
        params,
        mode: if check_mode {
            RunMode::CheckOnly
        } else {
            RunMode::Apply
        },
    })
}

/// Validate, connect and notify, folding every failure into a [`ModuleResult`]
///
/// `connect` builds the API client from the validated request; it is not
/// called when validation fails.
pub async fn run<A, F>(invocation: ModuleInvocation, connect: F) -> ModuleResult
where
    A: NewRelicApi,
    F: FnOnce(&DeploymentRequest) -> anyhow::Result<A>,
{
    let request = match invocation.params.validate() {
        Ok(request) => request,
        Err(e) => {
            error!("Invalid parameters: {}", e);
            return ModuleResult::failure(e.to_string());
        }
    };

    let api = match connect(&request) {
        Ok(api) => api,
        Err(e) => {
            error!("Failed to initialize New Relic client: {:#}", e);
            return ModuleResult::failure(format!("{e:#}"));
        }
    };

    let result = DeploymentNotifier::new(api)
        .notify(&request, invocation.mode)
        .await;
    if let Err(e) = &result {
        error!("Deployment notification failed: {}", e);
    }
    ModuleResult::from(result)
}
