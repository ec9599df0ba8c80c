//! Service layer for the sync jobs.
//!
//! This module contains the API clients and the pure aggregation logic:
//! - Greenhouse board reads (`GreenhouseClient`)
//! - HubDB draft writes (`HubDbClient`)
//! - CRM object reads/writes (`CrmClient`)
//! - Circle and CoinGecko market data (`CircleClient`, `CoinGeckoClient`)
//! - Qualtrics directory writes (`QualtricsClient`)
//! - Listing merge/group/row shaping (`listings`)

mod circle;
mod coingecko;
mod crm;
mod greenhouse;
mod hubdb;
pub mod listings;
mod qualtrics;

pub use circle::CircleClient;
pub use coingecko::CoinGeckoClient;
pub use crm::CrmClient;
pub use greenhouse::GreenhouseClient;
pub use hubdb::HubDbClient;
pub use qualtrics::QualtricsClient;
