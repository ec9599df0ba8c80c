// src/services/circle.rs

//! Circle API client.

use reqwest::Client;

use crate::error::Result;
use crate::models::{Stablecoin, StablecoinsResponse, YieldProduct, YieldResponse};

/// Client for the public Circle data endpoints.
pub struct CircleClient {
    client: Client,
    base_url: String,
}

impl CircleClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch supply figures for every stablecoin.
    pub async fn fetch_stablecoins(&self) -> Result<Vec<Stablecoin>> {
        let response: StablecoinsResponse = self
            .client
            .get(format!("{}/v1/stablecoins", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.data)
    }

    /// Fetch the public yield product offerings.
    pub async fn fetch_yield_products(&self) -> Result<Vec<YieldProduct>> {
        let response: YieldResponse = self
            .client
            .get(format!("{}/v1/yield/products/public", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.data)
    }
}
