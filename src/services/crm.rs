// src/services/crm.rs

//! HubSpot CRM client.
//!
//! Object listings are paginated; callers thread the `after` cursor through
//! their own loop. Authentication is a private-app bearer token.

use reqwest::Client;
use serde_json::json;

use crate::error::Result;
use crate::models::{ContactRecord, LineItem, Owner, PagedResponse, Ticket};

/// Client for the HubSpot CRM objects and owners APIs.
pub struct CrmClient {
    client: Client,
    base_url: String,
    token: String,
}

impl CrmClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Fetch one page of non-archived line items with the given properties.
    pub async fn list_line_items(
        &self,
        properties: &[&str],
        after: Option<&str>,
    ) -> Result<PagedResponse<LineItem>> {
        let mut request = self
            .client
            .get(format!("{}/crm/v3/objects/line_items", self.base_url))
            .bearer_auth(&self.token)
            .query(&[
                ("properties", properties.join(",").as_str()),
                ("archived", "false"),
            ]);
        if let Some(after) = after {
            request = request.query(&[("after", after)]);
        }

        let page = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page)
    }

    /// Write a recomputed projected revenue back to a line item.
    pub async fn update_projected_revenue(&self, id: &str, value: f64) -> Result<()> {
        self.client
            .patch(format!("{}/crm/v3/objects/line_items/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .json(&json!({ "properties": { "projected_revenue": value } }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Fetch one page of tickets with their contact associations.
    pub async fn list_tickets(
        &self,
        properties: &[&str],
        after: Option<&str>,
    ) -> Result<PagedResponse<Ticket>> {
        let mut request = self
            .client
            .get(format!("{}/crm/v3/objects/tickets", self.base_url))
            .bearer_auth(&self.token)
            .query(&[
                ("properties", properties.join(",").as_str()),
                ("associations", "contact"),
                ("limit", "100"),
            ]);
        if let Some(after) = after {
            request = request.query(&[("after", after)]);
        }

        let page = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page)
    }

    /// Fetch one contact with the given properties.
    pub async fn get_contact(&self, id: &str, properties: &[&str]) -> Result<ContactRecord> {
        let contact = self
            .client
            .get(format!("{}/crm/v3/objects/contacts/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .query(&[("properties", properties.join(",").as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(contact)
    }

    /// Fetch one owner record by id.
    pub async fn get_owner(&self, id: &str) -> Result<Owner> {
        let owner = self
            .client
            .get(format!("{}/crm/v3/owners/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .query(&[("idProperty", "id")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(owner)
    }
}
