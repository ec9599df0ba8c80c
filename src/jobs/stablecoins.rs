// src/jobs/stablecoins.rs

//! Stablecoin metrics job.
//!
//! Pulls USDC supply figures from Circle and 24h volumes from CoinGecko,
//! then drafts the merged per-coin values onto the metrics table and
//! publishes it.

use std::collections::HashMap;

use chrono::Utc;
use futures::future;

use crate::config::Secrets;
use crate::error::{AppError, Result};
use crate::models::{ChainMapping, CoinValues, Config, Stablecoin};
use crate::services::{CircleClient, CoinGeckoClient, HubDbClient};
use crate::utils::{format_abbreviated, http};

/// Symbol of the stablecoin whose supply is mirrored into the table.
const SUPPLY_SYMBOL: &str = "USDC";

/// Row id of the aggregate supply entry.
const TOTAL_SUPPLY_COIN: &str = "usd coin";

/// Run the stablecoin metrics sync.
pub async fn run_stablecoins(config: &Config, secrets: &Secrets) -> Result<()> {
    let client = http::create_client(&config.http)?;
    let circle = CircleClient::new(client.clone(), &config.circle.base_url);
    let coingecko = CoinGeckoClient::new(client.clone(), &config.coingecko.base_url);
    let hubdb = HubDbClient::new(client, &config.hubdb.base_url, secrets.hubspot_api_key()?);

    let timestamp = Utc::now().timestamp_millis().to_string();

    // Volumes first, supplies second; on colliding coin names the Circle
    // entry replaces the CoinGecko one.
    let mut data = fetch_volumes(&coingecko, &config.stablecoins.coins).await?;
    let stablecoins = circle.fetch_stablecoins().await?;
    let usdc = stablecoins
        .iter()
        .find(|coin| coin.symbol == SUPPLY_SYMBOL)
        .ok_or_else(|| AppError::api("fetch stablecoins", "no USDC entry in response"))?;
    data.extend(supply_values(usdc, &config.stablecoins.chains, &timestamp));

    let table = &config.hubdb.metrics_table;
    let rows = hubdb.list_rows(table).await?;
    for row in &rows {
        let Some(coin) = row.id_value() else { continue };
        let Some(values) = data.get(coin) else {
            log::debug!("No fresh values for row id '{}'", coin);
            continue;
        };
        match hubdb.patch_draft_row(table, &row.id, values).await {
            Ok(()) => log::info!("Drafted values for '{}'", coin),
            Err(error) => log::error!("Failed to draft values for '{}': {}", coin, error),
        }
    }

    hubdb.publish_draft(table).await?;
    log::info!("Metrics table published");

    Ok(())
}

/// Build per-coin supply values from the Circle payload.
///
/// Chains outside the configured mapping are ignored; the aggregate supply
/// lands under the fixed `usd coin` row id.
fn supply_values(
    coin: &Stablecoin,
    chains: &[ChainMapping],
    timestamp: &str,
) -> HashMap<String, CoinValues> {
    let mut values = HashMap::new();

    for chain in &coin.chains {
        let Some(mapping) = chains.iter().find(|m| m.symbol == chain.chain) else {
            continue;
        };
        match chain.amount.parse::<f64>() {
            Ok(amount) => {
                values.insert(mapping.coin.clone(), supply_entry(amount, timestamp));
            }
            Err(_) => {
                log::warn!(
                    "Unparseable amount '{}' for chain {}",
                    chain.amount,
                    chain.chain
                );
            }
        }
    }

    match coin.total_amount.parse::<f64>() {
        Ok(total) => {
            values.insert(TOTAL_SUPPLY_COIN.to_string(), supply_entry(total, timestamp));
        }
        Err(_) => log::warn!("Unparseable total amount '{}'", coin.total_amount),
    }

    values
}

fn supply_entry(amount: f64, timestamp: &str) -> CoinValues {
    CoinValues {
        update_date: Some(timestamp.to_string()),
        total_supply: Some(format!("${}", format_abbreviated(amount))),
        trading_volume_24h: None,
    }
}

/// Fetch 24h volumes for the tracked coins.
///
/// Chart fetches overlap; the result map is assembled only after every fetch
/// has resolved, keyed by lowercased coin name, so completion order never
/// shows in the output.
async fn fetch_volumes(
    coingecko: &CoinGeckoClient,
    tracked: &[String],
) -> Result<HashMap<String, CoinValues>> {
    let coins = coingecko.list_coins().await?;
    let tracked_coins: Vec<_> = coins
        .into_iter()
        .filter(|coin| {
            let name = coin.name.to_lowercase();
            tracked.iter().any(|tracked_name| tracked_name == &name)
        })
        .collect();

    let requests = tracked_coins
        .iter()
        .map(|coin| async move { (coin, coingecko.market_chart(&coin.id).await) });

    let mut volumes = HashMap::new();
    for (coin, result) in future::join_all(requests).await {
        match result {
            Ok(chart) => {
                let Some(volume) = chart.latest_volume() else {
                    log::warn!("Empty market chart for '{}'", coin.id);
                    continue;
                };
                volumes.insert(
                    coin.name.to_lowercase(),
                    CoinValues {
                        trading_volume_24h: Some(format!("${}", format_abbreviated(volume))),
                        ..CoinValues::default()
                    },
                );
            }
            Err(error) => {
                log::warn!("Failed to fetch market chart for '{}': {}", coin.id, error);
            }
        }
    }
    Ok(volumes)
}
