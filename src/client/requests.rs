//! Request payloads for the New Relic REST API v2.
//!
//! API Reference: https://docs.newrelic.com/docs/apm/new-relic-apm/maintenance/record-monitor-deployments/

use serde::Serialize;

use crate::request::DeploymentRequest;

/// Body of `POST /v2/applications/{id}/deployments.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDeploymentRequest {
    pub deployment: DeploymentRecord,
}

/// Deployment marker fields
///
/// All four keys are always sent, empty when the caller gave no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRecord {
    pub revision: String,
    pub changelog: String,
    pub description: String,
    pub user: String,
}

impl From<&DeploymentRequest> for CreateDeploymentRequest {
    fn from(request: &DeploymentRequest) -> Self {
        Self {
            deployment: DeploymentRecord {
                revision: request.revision().to_string(),
                changelog: request.changelog().to_string(),
                description: request.description().to_string(),
                user: request.user().to_string(),
            },
        }
    }
}

/// Form field used to filter the application listing by name
pub const APPLICATION_NAME_FILTER: &str = "filter[name]";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::DeploymentParams;
    use serde_json::json;

    #[test]
    fn test_omitted_fields_serialize_as_empty_strings() {
        let request = DeploymentParams {
            token: Some("AAAAAA".to_string()),
            application_id: Some("123".to_string()),
            revision: Some("1.0".to_string()),
            appname: Some("ignored".to_string()),
            environment: Some("production".to_string()),
            ..DeploymentParams::default()
        }
        .validate()
        .unwrap();

        let body = serde_json::to_value(CreateDeploymentRequest::from(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "deployment": {
                    "revision": "1.0",
                    "changelog": "",
                    "description": "",
                    "user": ""
                }
            })
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        let request = DeploymentParams {
            token: Some("AAAAAA".to_string()),
            application_id: Some("123".to_string()),
            changelog: Some(r#"fix "quoted" bug"#.to_string()),
            ..DeploymentParams::default()
        }
        .validate()
        .unwrap();

        let text = serde_json::to_string(&CreateDeploymentRequest::from(&request)).unwrap();
        assert!(text.contains(r#"fix \"quoted\" bug"#));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["deployment"]["changelog"], r#"fix "quoted" bug"#);
    }
}
