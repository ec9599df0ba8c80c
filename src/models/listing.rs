//! In-run domain types for the listings pipeline.
//!
//! These exist only between fetch and publish within a single run; nothing
//! here is persisted.

use crate::error::{AppError, Result};
use crate::models::{BoardConfig, DepartmentsResponse};

/// A successfully fetched board, paired with its configuration.
#[derive(Debug, Clone)]
pub struct BoardFetch {
    pub board: BoardConfig,
    pub tree: DepartmentsResponse,
}

/// A job posting annotated with its source board and owning department.
#[derive(Debug, Clone)]
pub struct Job {
    /// Title with the source board's suffix already applied
    pub title: String,

    /// Absolute application URL
    pub url: String,

    /// Location name as reported by the board
    pub location: String,

    /// Identifier of the board this job came from
    pub board: String,
}

/// A department of the merged tree, holding jobs from every board.
#[derive(Debug, Clone)]
pub struct MergedDepartment {
    pub name: String,
    pub jobs: Vec<Job>,
}

/// The de-duplicated, cross-board representation of one job title.
///
/// Keyed by trimmed title; collection order of `urls` and `locations` is
/// first-seen order, and `department`/`board` are taken from the first
/// occurrence.
#[derive(Debug, Clone)]
pub struct AggregatedListing {
    /// Trimmed title shared by every grouped posting
    pub title: String,

    /// Owning department name
    pub department: String,

    /// Board of the first occurrence; used for the description lookup
    pub board: String,

    /// Application URLs of every grouped posting
    pub urls: Vec<String>,

    /// Location names of every grouped posting
    pub locations: Vec<String>,

    /// Unescaped HTML description, empty when the detail fetch failed
    pub description: String,
}

impl AggregatedListing {
    /// Check the publish invariant: at least one URL and one location.
    pub fn validate(&self) -> Result<()> {
        if self.urls.is_empty() {
            return Err(AppError::validation(format!(
                "Listing '{}' has no application URL",
                self.title
            )));
        }
        if self.locations.is_empty() {
            return Err(AppError::validation(format!(
                "Listing '{}' has no location",
                self.title
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_listing() -> AggregatedListing {
        AggregatedListing {
            title: "Engineer".to_string(),
            department: "Eng".to_string(),
            board: "acme".to_string(),
            urls: vec!["https://example.com/jobs/1".to_string()],
            locations: vec!["Remote".to_string()],
            description: String::new(),
        }
    }

    #[test]
    fn validate_accepts_complete_listing() {
        assert!(sample_listing().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_urls() {
        let mut listing = sample_listing();
        listing.urls.clear();
        assert!(listing.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_locations() {
        let mut listing = sample_listing();
        listing.locations.clear();
        assert!(listing.validate().is_err());
    }
}
