// src/jobs/line_items.rs

//! Line-item formula recompute job.
//!
//! Walks every non-archived CRM line item and rewrites `projected_revenue`
//! wherever the stored value no longer matches the formula.

use crate::config::Secrets;
use crate::error::Result;
use crate::models::{Config, LineItemProperties};
use crate::services::CrmClient;
use crate::utils::http;

/// Properties involved in the formula, including the result property.
const REQUIRED_PROPS: [&str; 6] = [
    "expected_monthly_transactions",
    "fixed_fee",
    "expected_monthly_volume",
    "interest_rate",
    "price",
    "projected_revenue",
];

/// Run the recompute over all line items.
pub async fn run_line_items(config: &Config, secrets: &Secrets) -> Result<()> {
    let client = http::create_client(&config.http)?;
    let crm = CrmClient::new(
        client,
        &config.crm.base_url,
        secrets.hubspot_access_token()?,
    );

    let mut cursor: Option<String> = None;
    let mut scanned = 0usize;
    let mut updated = 0usize;

    loop {
        let page = crm
            .list_line_items(&REQUIRED_PROPS, cursor.as_deref())
            .await?;
        let next = page.next_cursor().map(str::to_string);
        scanned += page.results.len();

        for item in &page.results {
            let computed = projected_revenue(&item.properties);
            let stored = number(&item.properties.projected_revenue);
            if computed == stored {
                continue;
            }
            log::info!(
                "Line item {}: projected revenue {} -> {}",
                item.id,
                stored,
                computed
            );
            match crm.update_projected_revenue(&item.id, computed).await {
                Ok(()) => updated += 1,
                Err(error) => log::error!("Failed to update line item {}: {}", item.id, error),
            }
        }

        match next {
            Some(after) => cursor = Some(after),
            None => break,
        }
    }

    log::info!("Scanned {} line items, updated {}", scanned, updated);
    Ok(())
}

/// Annualized revenue formula. Absent or unparseable properties count as
/// zero.
fn projected_revenue(props: &LineItemProperties) -> f64 {
    number(&props.expected_monthly_transactions) * 12.0 * number(&props.fixed_fee)
        + (number(&props.expected_monthly_volume) * 12.0 * number(&props.interest_rate)) / 100.0
        + number(&props.price)
}

fn number(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(
        transactions: &str,
        fee: &str,
        volume: &str,
        rate: &str,
        price: &str,
    ) -> LineItemProperties {
        LineItemProperties {
            expected_monthly_transactions: Some(transactions.to_string()),
            fixed_fee: Some(fee.to_string()),
            expected_monthly_volume: Some(volume.to_string()),
            interest_rate: Some(rate.to_string()),
            price: Some(price.to_string()),
            projected_revenue: None,
        }
    }

    #[test]
    fn formula_combines_all_terms() {
        // 100 * 12 * 2 + (5000 * 12 * 10) / 100 + 30 = 2400 + 6000 + 30
        let value = projected_revenue(&props("100", "2", "5000", "10", "30"));
        assert_eq!(value, 8430.0);
    }

    #[test]
    fn absent_properties_count_as_zero() {
        let value = projected_revenue(&LineItemProperties::default());
        assert_eq!(value, 0.0);

        let value = projected_revenue(&LineItemProperties {
            price: Some("30".to_string()),
            ..LineItemProperties::default()
        });
        assert_eq!(value, 30.0);
    }

    #[test]
    fn unparseable_properties_count_as_zero() {
        let value = projected_revenue(&props("n/a", "2", "", "10", "30"));
        assert_eq!(value, 30.0);
    }

    #[test]
    fn stored_value_reads_as_number() {
        assert_eq!(number(&Some("123.5".to_string())), 123.5);
        assert_eq!(number(&None), 0.0);
    }
}
