//! Circle API wire payloads.

use serde::Deserialize;
use serde_json::Value;

/// Response of `GET /v1/stablecoins`.
#[derive(Debug, Clone, Deserialize)]
pub struct StablecoinsResponse {
    pub data: Vec<Stablecoin>,
}

/// Supply figures for one stablecoin across chains.
#[derive(Debug, Clone, Deserialize)]
pub struct Stablecoin {
    /// Coin symbol, e.g. "USDC"
    pub symbol: String,

    /// Total circulating amount across all chains, as a decimal string
    #[serde(rename = "totalAmount")]
    pub total_amount: String,

    /// Per-chain circulating amounts
    #[serde(default)]
    pub chains: Vec<ChainSupply>,
}

/// Circulating amount on a single chain.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainSupply {
    /// Chain symbol, e.g. "ETH"
    pub chain: String,

    /// Circulating amount as a decimal string
    pub amount: String,
}

/// Response of `GET /v1/yield/products/public`.
#[derive(Debug, Clone, Deserialize)]
pub struct YieldResponse {
    pub data: Vec<YieldProduct>,
}

/// One yield product offering.
///
/// `term_length` and `customer_rate` are kept as raw JSON values; the rate is
/// forwarded verbatim into the destination row while the term is rendered to
/// a string.
#[derive(Debug, Clone, Deserialize)]
pub struct YieldProduct {
    #[serde(rename = "termLength")]
    pub term_length: Value,

    #[serde(rename = "customerRate")]
    pub customer_rate: Value,

    /// RFC 3339 date the rate takes effect
    #[serde(rename = "effectiveDate")]
    pub effective_date: String,
}
