// src/services/qualtrics.rs

//! Qualtrics directory client.

use reqwest::Client;

use crate::error::Result;
use crate::models::{DirectoryContact, TokenResponse};

/// Client for the Qualtrics OAuth and directory-contacts APIs.
pub struct QualtricsClient {
    client: Client,
    base_url: String,
}

impl QualtricsClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Exchange client credentials for a bearer token.
    pub async fn authenticate(&self, client_id: &str, client_secret: &str) -> Result<String> {
        let response: TokenResponse = self
            .client
            .post(format!("{}/oauth2/token", self.base_url))
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", "manage:all"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.access_token)
    }

    /// Create one contact in a directory pool.
    pub async fn create_contact(
        &self,
        token: &str,
        pool: &str,
        contact: &DirectoryContact,
    ) -> Result<()> {
        self.client
            .post(format!(
                "{}/API/v3/directories/{}/contacts",
                self.base_url, pool
            ))
            .bearer_auth(token)
            .json(contact)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
