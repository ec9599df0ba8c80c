// src/services/hubdb.rs

//! HubSpot HubDB client.
//!
//! All writes go to the draft layer; readers only see them after one of the
//! publish calls. Authentication is the `hapikey` query parameter.

use reqwest::Client;
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::models::{BatchPurgeRequest, DraftPatch, Row, RowInput, RowsResponse};

/// Client for the HubDB tables API.
pub struct HubDbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HubDbClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, table: &str, tail: &str) -> String {
        format!("{}/tables/{}/{}", self.base_url, table, tail)
    }

    fn key(&self) -> [(&'static str, &str); 1] {
        [("hapikey", self.api_key.as_str())]
    }

    /// Read all published rows of a table.
    pub async fn list_rows(&self, table: &str) -> Result<Vec<Row>> {
        let response: RowsResponse = self
            .client
            .get(self.url(table, "rows"))
            .query(&self.key())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.results)
    }

    /// Delete the given rows from the draft table in one batch call.
    pub async fn purge_rows(&self, table: &str, ids: Vec<String>) -> Result<()> {
        self.client
            .post(self.url(table, "rows/draft/batch/purge"))
            .query(&self.key())
            .json(&BatchPurgeRequest { inputs: ids })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Create one draft row.
    pub async fn create_row(&self, table: &str, row: &RowInput) -> Result<()> {
        self.client
            .post(self.url(table, "rows"))
            .query(&self.key())
            .json(row)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Patch the draft values of one existing row.
    pub async fn patch_draft_row<T: Serialize>(
        &self,
        table: &str,
        row_id: &str,
        values: &T,
    ) -> Result<()> {
        self.client
            .patch(self.url(table, &format!("rows/{row_id}/draft")))
            .query(&self.key())
            .json(&DraftPatch { values })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Publish the draft table (`draft/publish` endpoint).
    pub async fn publish_draft(&self, table: &str) -> Result<()> {
        self.client
            .post(self.url(table, "draft/publish"))
            .query(&self.key())
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Push the draft table live (`draft/push-live` endpoint).
    pub async fn push_live(&self, table: &str) -> Result<()> {
        self.client
            .post(self.url(table, "draft/push-live"))
            .query(&self.key())
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
