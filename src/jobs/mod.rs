//! Job entry points, one per scheduled sync.
//!
//! - `run_listings`: Aggregate job boards into the listings table
//! - `run_stablecoins`: Sync supply/volume metrics into the metrics table
//! - `run_yield_rates`: Sync yield rates into the yield table
//! - `run_line_items`: Recompute the projected-revenue formula field
//! - `run_surveys`: Export closed-ticket contacts to the survey directory

pub mod line_items;
pub mod listings;
pub mod stablecoins;
pub mod surveys;
pub mod yield_rates;

pub use line_items::run_line_items;
pub use listings::run_listings;
pub use stablecoins::run_stablecoins;
pub use surveys::run_surveys;
pub use yield_rates::run_yield_rates;
