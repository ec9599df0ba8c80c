// src/services/greenhouse.rs

//! Greenhouse job-board client.

use futures::future;
use reqwest::Client;

use crate::error::Result;
use crate::models::{BoardConfig, BoardFetch, DepartmentsResponse, JobDetail};

/// Client for the public Greenhouse board API.
pub struct GreenhouseClient {
    client: Client,
    base_url: String,
}

impl GreenhouseClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the department tree of a single board.
    pub async fn fetch_departments(&self, board: &str) -> Result<DepartmentsResponse> {
        let url = format!("{}/v1/boards/{}/departments", self.base_url, board);
        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    /// Fetch the full description markup of a single job.
    pub async fn fetch_job_content(&self, board: &str, job_id: &str) -> Result<String> {
        let url = format!("{}/v1/boards/{}/jobs/{}", self.base_url, board, job_id);
        let detail: JobDetail = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(detail.content)
    }

    /// Fetch every configured board concurrently.
    ///
    /// Results come back in board order regardless of completion order. A
    /// failed board is logged and dropped; its jobs are simply absent from
    /// the merge.
    pub async fn fetch_boards(&self, boards: &[BoardConfig]) -> Vec<BoardFetch> {
        let requests = boards
            .iter()
            .map(|board| async move { (board, self.fetch_departments(&board.id).await) });

        let mut fetched = Vec::new();
        for (board, result) in future::join_all(requests).await {
            match result {
                Ok(tree) => fetched.push(BoardFetch {
                    board: board.clone(),
                    tree,
                }),
                Err(error) => {
                    log::warn!("Failed to fetch board '{}': {}", board.id, error);
                }
            }
        }
        fetched
    }
}
