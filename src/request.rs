//! # Deployment Request
//!
//! Raw invocation parameters and the validated request built from them.
//!
//! [`DeploymentParams`] mirrors what the host (or the command line) hands us:
//! every field optional, loosely typed. [`DeploymentParams::validate`] turns it
//! into a [`DeploymentRequest`], rejecting bad combinations before any I/O.

use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::config::parse_bool;
use crate::error::NotifyError;

/// Raw invocation parameters
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentParams {
    #[serde(default, deserialize_with = "host_string")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "host_string")]
    pub app_name: Option<String>,
    #[serde(default, deserialize_with = "host_string")]
    pub application_id: Option<String>,
    #[serde(default, deserialize_with = "host_string")]
    pub changelog: Option<String>,
    #[serde(default, deserialize_with = "host_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "host_string")]
    pub revision: Option<String>,
    #[serde(default, deserialize_with = "host_string")]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "host_string")]
    pub appname: Option<String>,
    #[serde(default, deserialize_with = "host_string")]
    pub environment: Option<String>,
    #[serde(default, deserialize_with = "host_bool")]
    pub validate_certs: Option<bool>,
}

impl fmt::Debug for DeploymentParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentParams")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("app_name", &self.app_name)
            .field("application_id", &self.application_id)
            .field("revision", &self.revision)
            .field("validate_certs", &self.validate_certs)
            .finish_non_exhaustive()
    }
}

/// How the target application is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppTarget {
    /// Resolve the id by looking up this exact application name
    Name(String),
    /// Use this application id as-is
    Id(String),
}

/// Validated, immutable deployment notification request
#[derive(Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    token: String,
    target: AppTarget,
    changelog: String,
    description: String,
    revision: String,
    user: String,
    appname: String,
    environment: String,
    validate_certs: bool,
}

impl fmt::Debug for DeploymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentRequest")
            .field("target", &self.target)
            .field("revision", &self.revision)
            .field("user", &self.user)
            .field("appname", &self.appname)
            .field("environment", &self.environment)
            .field("validate_certs", &self.validate_certs)
            .finish_non_exhaustive()
    }
}

impl DeploymentParams {
    /// Validate the parameters into a [`DeploymentRequest`]
    ///
    /// Empty strings count as "not supplied", matching how the host treats them.
    ///
    /// # Errors
    /// Returns [`NotifyError::Configuration`] if the token is missing, or if
    /// not exactly one of `app_name` / `application_id` is set.
    pub fn validate(self) -> Result<DeploymentRequest, NotifyError> {
        let token = non_empty(self.token)
            .ok_or_else(|| NotifyError::config("missing required arguments: token"))?;

        let target = match (non_empty(self.app_name), non_empty(self.application_id)) {
            (Some(_), Some(_)) => {
                return Err(NotifyError::config(
                    "only one of 'app_name' or 'application_id' can be set",
                ))
            }
            (Some(name), None) => AppTarget::Name(name),
            (None, Some(id)) => AppTarget::Id(id),
            (None, None) => {
                return Err(NotifyError::config(
                    "you must set one of 'app_name' or 'application_id'",
                ))
            }
        };

        Ok(DeploymentRequest {
            token,
            target,
            changelog: self.changelog.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            revision: self.revision.unwrap_or_default(),
            user: self.user.unwrap_or_default(),
            appname: self.appname.unwrap_or_default(),
            environment: self.environment.unwrap_or_default(),
            validate_certs: self.validate_certs.unwrap_or(true),
        })
    }
}

impl DeploymentRequest {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn target(&self) -> &AppTarget {
        &self.target
    }

    pub fn changelog(&self) -> &str {
        &self.changelog
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Accepted for compatibility; not sent to New Relic
    pub fn appname(&self) -> &str {
        &self.appname
    }

    /// Accepted for compatibility; not sent to New Relic
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn validate_certs(&self) -> bool {
        self.validate_certs
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Scalar as emitted by the host: YAML turns `revision=1.0` into a number
#[derive(Deserialize)]
#[serde(untagged)]
enum HostScalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

fn host_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HostScalar> = Option::deserialize(deserializer)?;
    Ok(raw.map(|scalar| match scalar {
        HostScalar::Text(s) => s,
        HostScalar::Number(n) => n.to_string(),
        HostScalar::Bool(b) => b.to_string(),
    }))
}

fn host_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HostScalar> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(HostScalar::Bool(b)) => Ok(Some(b)),
        Some(HostScalar::Text(s)) => parse_bool(&s).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("'{s}' is not a valid boolean"))
        }),
        Some(HostScalar::Number(n)) => match n.as_u64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(serde::de::Error::custom(format!(
                "'{n}' is not a valid boolean"
            ))),
        },
    }
}
