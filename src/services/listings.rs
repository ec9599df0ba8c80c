// src/services/listings.rs

//! Listing aggregation logic.
//!
//! The pure stages of the listings pipeline: merging board trees into one
//! department tree, grouping jobs by title, and shaping destination rows.
//! Network calls stay in the API clients and the job orchestrator.

use std::collections::HashMap;

use serde_json::{Map, Value};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{AggregatedListing, BoardFetch, Job, JobPosting, MergedDepartment, RowInput};
use crate::utils::bullet_list;

/// Merge fetched board trees into one department tree.
///
/// The first board's departments are the base structure and keep their order.
/// Later boards are joined by department name; their jobs are appended after
/// the base jobs, tagged with the source board and with the board's title
/// suffix appended to the trimmed title. A department name unknown to the
/// base tree aborts the merge.
pub fn merge_boards(fetched: &[BoardFetch]) -> Result<Vec<MergedDepartment>> {
    let Some((base, rest)) = fetched.split_first() else {
        return Err(AppError::structure("No board trees to merge"));
    };

    let mut departments: Vec<MergedDepartment> = base
        .tree
        .departments
        .iter()
        .map(|dept| MergedDepartment {
            name: dept.name.clone(),
            jobs: dept
                .jobs
                .iter()
                .map(|job| tag_job(job, &base.board.id, ""))
                .collect(),
        })
        .collect();

    let index: HashMap<&str, usize> = base
        .tree
        .departments
        .iter()
        .enumerate()
        .map(|(i, dept)| (dept.name.as_str(), i))
        .collect();

    for fetch in rest {
        for dept in &fetch.tree.departments {
            let Some(&i) = index.get(dept.name.as_str()) else {
                return Err(AppError::structure(format!(
                    "Board '{}' lists department '{}' unknown to base board '{}'",
                    fetch.board.id, dept.name, base.board.id
                )));
            };
            departments[i].jobs.extend(
                dept.jobs
                    .iter()
                    .map(|job| tag_job(job, &fetch.board.id, &fetch.board.title_suffix)),
            );
        }
    }

    Ok(departments)
}

fn tag_job(posting: &JobPosting, board: &str, suffix: &str) -> Job {
    Job {
        title: format!("{}{}", posting.title.trim(), suffix),
        url: posting.absolute_url.clone(),
        location: posting.location.name.clone(),
        board: board.to_string(),
    }
}

/// Group merged jobs by trimmed title, in first-seen order.
///
/// URLs and locations collect across all occurrences; department and source
/// board come from the first occurrence. Descriptions start empty and are
/// filled in by the detail lookups.
pub fn group_listings(departments: &[MergedDepartment]) -> Vec<AggregatedListing> {
    let mut listings: Vec<AggregatedListing> = Vec::new();
    let mut by_title: HashMap<String, usize> = HashMap::new();

    for dept in departments {
        for job in &dept.jobs {
            let title = job.title.trim();
            match by_title.get(title) {
                Some(&i) => {
                    listings[i].urls.push(job.url.clone());
                    listings[i].locations.push(job.location.clone());
                }
                None => {
                    by_title.insert(title.to_string(), listings.len());
                    listings.push(AggregatedListing {
                        title: title.to_string(),
                        department: dept.name.clone(),
                        board: job.board.clone(),
                        urls: vec![job.url.clone()],
                        locations: vec![job.location.clone()],
                        description: String::new(),
                    });
                }
            }
        }
    }

    listings
}

/// Derive the job id from an application URL's last path segment.
pub fn job_id_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_string)
}

/// Keep only the text before the first `-` of a location name.
pub fn format_location(location: &str) -> String {
    location
        .split('-')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Shape one destination row from an aggregated listing.
pub fn build_row(listing: &AggregatedListing) -> RowInput {
    let links = bullet_list(listing.urls.iter());
    let locations = bullet_list(listing.locations.iter().map(|name| format_location(name)));

    let mut values = Map::new();
    values.insert("links".to_string(), Value::String(links));
    values.insert("locations".to_string(), Value::String(locations));
    values.insert(
        "department".to_string(),
        Value::String(listing.department.clone()),
    );
    values.insert("name".to_string(), Value::String(listing.title.clone()));
    values.insert(
        "description".to_string(),
        Value::String(listing.description.clone()),
    );

    RowInput {
        path: listing.title.to_lowercase(),
        name: listing.title.clone(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoardConfig, Department, DepartmentsResponse, JobLocation};

    fn posting(title: &str, url: &str, location: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            absolute_url: url.to_string(),
            location: JobLocation {
                name: location.to_string(),
            },
        }
    }

    fn fetch(board: &str, suffix: &str, departments: Vec<Department>) -> BoardFetch {
        BoardFetch {
            board: BoardConfig {
                id: board.to_string(),
                title_suffix: suffix.to_string(),
            },
            tree: DepartmentsResponse { departments },
        }
    }

    fn dept(name: &str, jobs: Vec<JobPosting>) -> Department {
        Department {
            name: name.to_string(),
            jobs,
        }
    }

    #[test]
    fn merge_concatenates_jobs_in_board_order() {
        let fetched = vec![
            fetch(
                "a",
                "",
                vec![dept("Eng", vec![posting("Dev", "https://x/jobs/1", "NY")])],
            ),
            fetch(
                "b",
                "",
                vec![dept("Eng", vec![posting("SRE", "https://x/jobs/2", "SF")])],
            ),
        ];

        let merged = merge_boards(&fetched).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Eng");
        let titles: Vec<_> = merged[0].jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, ["Dev", "SRE"]);
        assert_eq!(merged[0].jobs[0].board, "a");
        assert_eq!(merged[0].jobs[1].board, "b");
    }

    #[test]
    fn merge_joins_departments_by_name_not_position() {
        let fetched = vec![
            fetch(
                "a",
                "",
                vec![
                    dept("Eng", vec![posting("Dev", "https://x/jobs/1", "NY")]),
                    dept("Sales", vec![posting("AE", "https://x/jobs/2", "NY")]),
                ],
            ),
            fetch(
                "b",
                "",
                vec![
                    // Reversed order relative to the base board
                    dept("Sales", vec![posting("SDR", "https://x/jobs/3", "SF")]),
                    dept("Eng", vec![posting("SRE", "https://x/jobs/4", "SF")]),
                ],
            ),
        ];

        let merged = merge_boards(&fetched).unwrap();
        assert_eq!(merged[0].name, "Eng");
        assert_eq!(merged[0].jobs[1].title, "SRE");
        assert_eq!(merged[1].name, "Sales");
        assert_eq!(merged[1].jobs[1].title, "SDR");
    }

    #[test]
    fn merge_rejects_unknown_department() {
        let fetched = vec![
            fetch(
                "a",
                "",
                vec![dept("Eng", vec![posting("Dev", "https://x/jobs/1", "NY")])],
            ),
            fetch(
                "b",
                "",
                vec![dept("Marketing", vec![posting("PMM", "https://x/jobs/2", "SF")])],
            ),
        ];

        assert!(merge_boards(&fetched).is_err());
    }

    #[test]
    fn merge_rejects_empty_input() {
        assert!(merge_boards(&[]).is_err());
    }

    #[test]
    fn merge_applies_suffix_to_later_boards_only() {
        let fetched = vec![
            fetch(
                "a",
                "",
                vec![dept("Eng", vec![posting(" Dev ", "https://x/jobs/1", "NY")])],
            ),
            fetch(
                "b",
                " Perm",
                vec![dept("Eng", vec![posting(" Dev ", "https://x/jobs/2", "SF")])],
            ),
        ];

        let merged = merge_boards(&fetched).unwrap();
        // Titles are trimmed before the suffix is appended
        assert_eq!(merged[0].jobs[0].title, "Dev");
        assert_eq!(merged[0].jobs[1].title, "Dev Perm");
    }

    #[test]
    fn grouping_collapses_titles_that_trim_equal() {
        let departments = vec![MergedDepartment {
            name: "Eng".to_string(),
            jobs: vec![
                Job {
                    title: "Engineer ".to_string(),
                    url: "https://x/jobs/1".to_string(),
                    location: "NY".to_string(),
                    board: "a".to_string(),
                },
                Job {
                    title: "Engineer".to_string(),
                    url: "https://x/jobs/2".to_string(),
                    location: "SF".to_string(),
                    board: "b".to_string(),
                },
            ],
        }];

        let listings = group_listings(&departments);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Engineer");
        assert_eq!(listings[0].urls.len(), 2);
        assert_eq!(listings[0].locations, ["NY", "SF"]);
        // First occurrence wins for the source board
        assert_eq!(listings[0].board, "a");
    }

    #[test]
    fn grouping_keeps_first_seen_order() {
        let departments = vec![
            MergedDepartment {
                name: "Eng".to_string(),
                jobs: vec![Job {
                    title: "Dev".to_string(),
                    url: "https://x/jobs/1".to_string(),
                    location: "NY".to_string(),
                    board: "a".to_string(),
                }],
            },
            MergedDepartment {
                name: "Sales".to_string(),
                jobs: vec![Job {
                    title: "AE".to_string(),
                    url: "https://x/jobs/2".to_string(),
                    location: "SF".to_string(),
                    board: "a".to_string(),
                }],
            },
        ];

        let listings = group_listings(&departments);
        let titles: Vec<_> = listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Dev", "AE"]);
        assert_eq!(listings[1].department, "Sales");
    }

    #[test]
    fn suffixed_boards_group_separately() {
        // Two boards listing the same position, one with a title suffix:
        // the suffix is applied before grouping, so two listings come out.
        let fetched = vec![
            fetch(
                "a",
                "",
                vec![dept("Eng", vec![posting("Dev", "https://x/jobs/1", "NY - US")])],
            ),
            fetch(
                "b",
                " Perm",
                vec![dept("Eng", vec![posting("Dev", "https://x/jobs/2", "SF - US")])],
            ),
        ];

        let merged = merge_boards(&fetched).unwrap();
        let listings = group_listings(&merged);

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Dev");
        assert_eq!(listings[0].urls, ["https://x/jobs/1"]);
        assert_eq!(listings[1].title, "Dev Perm");
        assert_eq!(listings[1].urls, ["https://x/jobs/2"]);
    }

    #[test]
    fn job_id_is_last_path_segment() {
        assert_eq!(
            job_id_from_url("https://boards.greenhouse.io/acme/jobs/4012345"),
            Some("4012345".to_string())
        );
        assert_eq!(
            job_id_from_url("https://boards.greenhouse.io/acme/jobs/4012345/"),
            Some("4012345".to_string())
        );
        assert_eq!(job_id_from_url("not a url"), None);
    }

    #[test]
    fn location_keeps_text_before_first_dash() {
        assert_eq!(format_location("New York - NY"), "New York");
        assert_eq!(format_location("Remote"), "Remote");
        assert_eq!(format_location("A - B - C"), "A");
    }

    #[test]
    fn row_shapes_path_and_values() {
        let listing = AggregatedListing {
            title: "Senior Dev".to_string(),
            department: "Eng".to_string(),
            board: "a".to_string(),
            urls: vec![
                "https://x/jobs/1".to_string(),
                "https://x/jobs/2".to_string(),
            ],
            locations: vec!["New York - NY".to_string(), "Remote".to_string()],
            description: "<p>desc</p>".to_string(),
        };

        let row = build_row(&listing);
        assert_eq!(row.path, "senior dev");
        assert_eq!(row.name, "Senior Dev");
        assert_eq!(
            row.values["links"],
            "<ul><li>https://x/jobs/1</li><li>https://x/jobs/2</li></ul>"
        );
        assert_eq!(
            row.values["locations"],
            "<ul><li>New York</li><li>Remote</li></ul>"
        );
        assert_eq!(row.values["department"], "Eng");
        assert_eq!(row.values["description"], "<p>desc</p>");
    }
}
