//! CoinGecko wire payloads.

use serde::Deserialize;

/// One entry of `GET /api/v3/coins/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinListing {
    pub id: String,
    pub name: String,
}

/// Response of `GET /api/v3/coins/{id}/market_chart`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChart {
    /// `[timestamp, volume]` pairs; with `days=0` the first pair is current
    #[serde(default)]
    pub total_volumes: Vec<(f64, f64)>,
}

impl MarketChart {
    /// The most recent 24h volume figure, if the chart has any points.
    pub fn latest_volume(&self) -> Option<f64> {
        self.total_volumes.first().map(|(_, volume)| *volume)
    }
}
