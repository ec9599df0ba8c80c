//! Qualtrics wire payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response of the OAuth client-credentials token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Body of `POST /API/v3/directories/{pool}/contacts`.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryContact {
    #[serde(rename = "firstName")]
    pub first_name: String,

    #[serde(rename = "lastName")]
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// External reference; carries the HubSpot owner id
    #[serde(rename = "extRef", skip_serializing_if = "Option::is_none")]
    pub ext_ref: Option<String>,

    /// Survey-visible ticket and contact attributes
    #[serde(rename = "embeddedData")]
    pub embedded_data: BTreeMap<String, String>,

    pub unsubscribed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_qualtrics_field_names() {
        let contact = DirectoryContact {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            ext_ref: None,
            embedded_data: BTreeMap::from([("ticket_id".to_string(), "42".to_string())]),
            unsubscribed: false,
        };
        let json = serde_json::to_string(&contact).unwrap();
        assert!(json.contains(r#""firstName":"Ada""#));
        assert!(json.contains(r#""embeddedData":{"ticket_id":"42"}"#));
        assert!(json.contains(r#""unsubscribed":false"#));
        assert!(!json.contains("extRef"));
    }
}
