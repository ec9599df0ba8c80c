// src/jobs/yield_rates.rs

//! Yield-rate sync job.
//!
//! Flattens Circle's yield product list into indexed columns on the single
//! row of the yield table, then publishes the draft.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use crate::config::Secrets;
use crate::error::{AppError, Result};
use crate::models::{Config, YieldProduct};
use crate::services::{CircleClient, HubDbClient};
use crate::utils::http;

/// Run the yield-rate sync.
pub async fn run_yield_rates(config: &Config, secrets: &Secrets) -> Result<()> {
    let client = http::create_client(&config.http)?;
    let circle = CircleClient::new(client.clone(), &config.circle.base_url);
    let hubdb = HubDbClient::new(client, &config.hubdb.base_url, secrets.hubspot_api_key()?);

    let products = circle.fetch_yield_products().await?;
    log::info!("Fetched {} yield products", products.len());
    let values = build_yield_values(&products);

    let table = &config.hubdb.yield_table;
    let rows = hubdb.list_rows(table).await?;
    // The table holds exactly one row carrying every rate column
    let row = rows
        .first()
        .ok_or_else(|| AppError::api("list rows", "yield table has no rows"))?;

    hubdb.patch_draft_row(table, &row.id, &values).await?;
    hubdb.publish_draft(table).await?;
    log::info!("Yield table published");

    Ok(())
}

/// Flatten products into indexed columns: `length_1`, `rate_1`, `date_1`, ...
///
/// Rates are forwarded verbatim; terms are rendered to strings; dates become
/// epoch-millisecond strings. An unparseable date drops that column and the
/// rest of the row still goes out.
fn build_yield_values(products: &[YieldProduct]) -> Map<String, Value> {
    let mut values = Map::new();
    for (i, product) in products.iter().enumerate() {
        let n = i + 1;
        values.insert(
            format!("length_{n}"),
            Value::String(render(&product.term_length)),
        );
        values.insert(format!("rate_{n}"), product.customer_rate.clone());
        match parse_millis(&product.effective_date) {
            Some(millis) => {
                values.insert(format!("date_{n}"), Value::String(millis.to_string()));
            }
            None => {
                log::warn!("Unparseable effective date '{}'", product.effective_date);
            }
        }
    }
    values
}

/// Parse an effective date (RFC 3339, or a bare date at UTC midnight) to
/// epoch milliseconds.
fn parse_millis(date: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.timestamp_millis());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
