//! Response payloads for the New Relic REST API v2.

use serde::Deserialize;
use std::fmt;

/// Body of `POST /v2/applications.json`
///
/// Only the fields the notifier reads are modelled; the rest is ignored.
#[derive(Debug, Deserialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<Application>,
}

/// One entry of the application listing
#[derive(Debug, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub name: String,
}

/// Application id as returned by the API
///
/// The API sends a number; string ids are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApplicationId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationId::Number(n) => write!(f, "{n}"),
            ApplicationId::Text(s) => f.write_str(s),
        }
    }
}

impl ApplicationListResponse {
    /// Id of the application whose name matches exactly
    ///
    /// The name filter on the API side is a substring match, so the listing
    /// may contain other applications too.
    pub fn find_id(&self, app_name: &str) -> Option<String> {
        self.applications
            .iter()
            .find(|app| app.name == app_name)
            .map(|app| app.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_id_requires_exact_name() {
        let listing: ApplicationListResponse = serde_json::from_str(
            r#"{
                "applications": [
                    {"id": 7, "name": "myapp-staging", "language": "ruby"},
                    {"id": 42, "name": "myapp", "health_status": "green"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(listing.find_id("myapp").as_deref(), Some("42"));
        assert_eq!(listing.find_id("myapp-staging").as_deref(), Some("7"));
        assert_eq!(listing.find_id("MyApp"), None);
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let listing: ApplicationListResponse =
            serde_json::from_str(r#"{"applications": [{"id": "abc", "name": "myapp"}]}"#)
                .unwrap();
        assert_eq!(listing.find_id("myapp").as_deref(), Some("abc"));
    }
}
