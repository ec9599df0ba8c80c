// src/config.rs

//! Secret loading from the process environment.
//!
//! Non-secret settings live in `config.toml` (see `models::Config`); API
//! credentials are only ever read from environment variables.

use std::env;

use crate::error::{AppError, Result};

/// Credentials sourced from the environment at startup.
///
/// Every field is optional at load time; each job demands the credentials it
/// actually needs via the accessor methods, so e.g. `listings` runs without
/// any Qualtrics variables set.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// HubSpot API key, passed as the `hapikey` query parameter (HubDB)
    pub hubspot_api_key: Option<String>,

    /// HubSpot private-app token, passed as a bearer header (CRM)
    pub hubspot_access_token: Option<String>,

    /// Qualtrics OAuth client id
    pub qualtrics_client_id: Option<String>,

    /// Qualtrics OAuth client secret
    pub qualtrics_client_secret: Option<String>,

    /// Qualtrics directory (pool) id
    pub qualtrics_pool_id: Option<String>,
}

impl Secrets {
    /// Read all known credential variables from the environment.
    pub fn from_env() -> Self {
        Self {
            hubspot_api_key: read_var("HUBSPOT_API_KEY"),
            hubspot_access_token: read_var("HUBSPOT_ACCESS_TOKEN"),
            qualtrics_client_id: read_var("QUALTRICS_CLIENT_ID"),
            qualtrics_client_secret: read_var("QUALTRICS_CLIENT_SECRET"),
            qualtrics_pool_id: read_var("QUALTRICS_POOL_ID"),
        }
    }

    /// HubSpot API key, required by the HubDB jobs.
    pub fn hubspot_api_key(&self) -> Result<&str> {
        require(&self.hubspot_api_key, "HUBSPOT_API_KEY")
    }

    /// HubSpot access token, required by the CRM jobs.
    pub fn hubspot_access_token(&self) -> Result<&str> {
        require(&self.hubspot_access_token, "HUBSPOT_ACCESS_TOKEN")
    }

    /// Qualtrics OAuth client credentials, required by the surveys job.
    pub fn qualtrics_credentials(&self) -> Result<(&str, &str)> {
        Ok((
            require(&self.qualtrics_client_id, "QUALTRICS_CLIENT_ID")?,
            require(&self.qualtrics_client_secret, "QUALTRICS_CLIENT_SECRET")?,
        ))
    }

    /// Qualtrics directory id, required by the surveys job.
    pub fn qualtrics_pool_id(&self) -> Result<&str> {
        require(&self.qualtrics_pool_id, "QUALTRICS_POOL_ID")
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| AppError::config(format!("Environment variable {name} is not set")))
}
