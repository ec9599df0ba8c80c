// src/jobs/listings.rs

//! Job-listing aggregation job.
//!
//! Fetch every configured board, merge the trees, group jobs by title, pull
//! one description per title, then fully replace the destination table:
//! purge, post one row per title, push the draft live.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};

use crate::config::Secrets;
use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::listings::{build_row, group_listings, job_id_from_url, merge_boards};
use crate::services::{GreenhouseClient, HubDbClient};
use crate::utils::{http, unescape_html};

/// Run the listings pipeline.
pub async fn run_listings(config: &Config, secrets: &Secrets) -> Result<()> {
    let client = http::create_client(&config.http)?;
    let greenhouse = GreenhouseClient::new(client.clone(), &config.greenhouse.base_url);
    let hubdb = HubDbClient::new(client, &config.hubdb.base_url, secrets.hubspot_api_key()?);
    let table = &config.hubdb.listings_table;

    log::info!("Fetching {} job boards", config.greenhouse.boards.len());
    let fetched = greenhouse.fetch_boards(&config.greenhouse.boards).await;
    if fetched.is_empty() {
        return Err(AppError::api("fetch boards", "every board fetch failed"));
    }

    let merged = merge_boards(&fetched)?;
    let mut listings = group_listings(&merged);
    log::info!("Aggregated {} distinct titles", listings.len());

    // One description per title, keyed by the first URL's job id. Lookups
    // overlap up to the configured limit; results are merged back by title
    // so completion order does not matter.
    let lookups: Vec<(String, String, String)> = listings
        .iter()
        .filter_map(|listing| {
            let url = listing.urls.first()?;
            let Some(job_id) = job_id_from_url(url) else {
                log::warn!("No job id in URL '{}' for '{}'", url, listing.title);
                return None;
            };
            Some((listing.title.clone(), listing.board.clone(), job_id))
        })
        .collect();

    let concurrency = config.http.max_concurrent.max(1);
    let mut descriptions: HashMap<String, String> = HashMap::new();
    let mut detail_stream = stream::iter(lookups)
        .map(|(title, board, job_id)| {
            let greenhouse = &greenhouse;
            async move {
                let result = greenhouse.fetch_job_content(&board, &job_id).await;
                (title, result)
            }
        })
        .buffer_unordered(concurrency);

    while let Some((title, result)) = detail_stream.next().await {
        match result {
            Ok(content) => {
                descriptions.insert(title, unescape_html(&content));
            }
            Err(error) => {
                log::warn!("Failed to fetch description for '{}': {}", title, error);
            }
        }
    }

    for listing in &mut listings {
        if let Some(description) = descriptions.remove(&listing.title) {
            listing.description = description;
        }
    }

    // Full replace: purge everything, post one row per title, publish last.
    let rows = hubdb.list_rows(table).await?;
    let ids: Vec<String> = rows.into_iter().map(|row| row.id).collect();
    log::info!("Purging {} existing rows", ids.len());
    hubdb.purge_rows(table, ids).await?;

    for listing in &listings {
        if let Err(error) = listing.validate() {
            log::warn!("Skipping incomplete listing: {}", error);
            continue;
        }
        let row = build_row(listing);
        match hubdb.create_row(table, &row).await {
            Ok(()) => log::info!("Posted row '{}'", row.name),
            Err(error) => log::error!("Failed to post row '{}': {}", row.name, error),
        }
    }

    hubdb.push_live(table).await?;
    log::info!("Listings table published");

    Ok(())
}
