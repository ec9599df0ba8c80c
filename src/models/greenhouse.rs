//! Greenhouse wire payloads.

use serde::Deserialize;

/// Response of `GET /v1/boards/{board}/departments`.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentsResponse {
    pub departments: Vec<Department>,
}

/// A department and its open positions as exposed by one board.
#[derive(Debug, Clone, Deserialize)]
pub struct Department {
    /// Department display name
    pub name: String,

    /// Open positions, in board order
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
}

/// One open position in a department listing.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPosting {
    /// Posting title as written on the board
    pub title: String,

    /// Absolute application URL; its last path segment is the job id
    pub absolute_url: String,

    /// Posting location
    pub location: JobLocation,
}

/// Location block of a job posting.
#[derive(Debug, Clone, Deserialize)]
pub struct JobLocation {
    pub name: String,
}

/// Response of `GET /v1/boards/{board}/jobs/{id}`; only the description
/// body is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDetail {
    /// Job description as HTML-escaped markup
    pub content: String,
}
