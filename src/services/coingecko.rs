// src/services/coingecko.rs

//! CoinGecko API client.

use reqwest::Client;

use crate::error::Result;
use crate::models::{CoinListing, MarketChart};

/// Client for the public CoinGecko API.
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the full coin id/name listing.
    pub async fn list_coins(&self) -> Result<Vec<CoinListing>> {
        let coins = self
            .client
            .get(format!("{}/api/v3/coins/list", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(coins)
    }

    /// Fetch the current market chart of one coin in USD.
    pub async fn market_chart(&self, coin_id: &str) -> Result<MarketChart> {
        let chart = self
            .client
            .get(format!(
                "{}/api/v3/coins/{}/market_chart",
                self.base_url, coin_id
            ))
            .query(&[("vs_currency", "usd"), ("days", "0")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(chart)
    }
}
