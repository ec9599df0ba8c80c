// src/jobs/surveys.rs

//! Ticket-to-survey export job.
//!
//! Finds support tickets closed yesterday, expands their associated
//! contacts, and creates one Qualtrics directory contact per export
//! candidate.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};

use crate::config::Secrets;
use crate::error::Result;
use crate::models::{
    Config, ContactProperties, DirectoryContact, SurveysConfig, Ticket, TicketProperties,
};
use crate::services::{CrmClient, QualtricsClient};
use crate::utils::http;

/// Ticket properties requested from the CRM.
const TICKET_PROPERTIES: [&str; 8] = [
    "closed_date",
    "issue_category",
    "subject",
    "time_to_close",
    "ticket_id",
    "hs_pipeline",
    "hubspot_owner_id",
    "revenue_classification",
];

/// Contact properties requested from the CRM.
const CONTACT_PROPERTIES: [&str; 10] = [
    "createdate",
    "email",
    "firstname",
    "lastname",
    "hs_object_id",
    "hs_ip_timezone",
    "qualtrics_first_name",
    "qualtrics_last_name",
    "company",
    "qualtrics_region",
];

/// Run the survey-target export.
pub async fn run_surveys(config: &Config, secrets: &Secrets) -> Result<()> {
    let client = http::create_client(&config.http)?;
    let crm = CrmClient::new(
        client.clone(),
        &config.crm.base_url,
        secrets.hubspot_access_token()?,
    );
    let qualtrics = QualtricsClient::new(client, &config.qualtrics.base_url);
    let (client_id, client_secret) = secrets.qualtrics_credentials()?;
    let pool = secrets.qualtrics_pool_id()?;

    let yesterday = (Utc::now() - Duration::hours(24)).date_naive();

    // Walk every ticket page; one candidate per associated contact of each
    // ticket that passes the export filter.
    let mut candidates: Vec<(TicketProperties, String)> = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = crm
            .list_tickets(&TICKET_PROPERTIES, cursor.as_deref())
            .await?;
        let next = page.next_cursor().map(str::to_string);

        for ticket in page.results {
            if !is_exportable(&ticket, &config.surveys, yesterday) {
                continue;
            }
            if let Some(associations) = &ticket.associations {
                for contact in &associations.contacts.results {
                    candidates.push((ticket.properties.clone(), contact.id.clone()));
                }
            }
        }

        match next {
            Some(after) => cursor = Some(after),
            None => break,
        }
    }
    log::info!("Found {} export candidates", candidates.len());

    // Expand candidates into full directory contacts.
    let mut exports: Vec<DirectoryContact> = Vec::new();
    for (ticket, contact_id) in &candidates {
        let contact = match crm.get_contact(contact_id, &CONTACT_PROPERTIES).await {
            Ok(record) => record,
            Err(error) => {
                log::warn!("Failed to fetch contact {}: {}", contact_id, error);
                continue;
            }
        };
        let props = contact.properties;

        if is_blocked_email(&props.email, &config.surveys.blocked_email_domain) {
            log::debug!("Skipping internal contact {}", contact_id);
            continue;
        }

        let owner_name = match &ticket.hubspot_owner_id {
            Some(owner_id) => match crm.get_owner(owner_id).await {
                Ok(owner) => Some(owner.full_name()),
                Err(error) => {
                    log::warn!("Failed to fetch owner {}: {}", owner_id, error);
                    None
                }
            },
            None => None,
        };

        exports.push(build_directory_contact(&props, ticket, owner_name));
    }

    let token = qualtrics.authenticate(client_id, client_secret).await?;
    log::info!("Posting {} contacts to the survey directory", exports.len());
    for contact in &exports {
        match qualtrics.create_contact(&token, pool, contact).await {
            Ok(()) => log::info!("Created survey contact"),
            Err(error) => log::error!("Failed to create survey contact: {}", error),
        }
    }

    log::info!("Survey export complete");
    Ok(())
}

/// Export filter: associated contacts, support pipeline, a closed date on
/// the target day, and not an excluded issue category.
fn is_exportable(ticket: &Ticket, config: &SurveysConfig, day: NaiveDate) -> bool {
    let has_contacts = ticket
        .associations
        .as_ref()
        .is_some_and(|a| !a.contacts.results.is_empty());
    if !has_contacts {
        return false;
    }

    let props = &ticket.properties;
    if props.hs_pipeline.as_deref() != Some(config.support_pipeline.as_str()) {
        return false;
    }
    if props.issue_category.as_deref() == Some(config.excluded_issue_category.as_str()) {
        return false;
    }
    match &props.closed_date {
        Some(closed) => closed_on(closed, day),
        None => false,
    }
}

/// True when the timestamp's calendar day equals `day`.
fn closed_on(closed_date: &str, day: NaiveDate) -> bool {
    closed_date
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .is_some_and(|date| date == day)
}

fn is_blocked_email(email: &Option<String>, blocked_domain: &str) -> bool {
    email
        .as_deref()
        .is_some_and(|address| address.contains(blocked_domain))
}

/// Map CRM contact and ticket properties onto the Qualtrics naming scheme.
fn build_directory_contact(
    contact: &ContactProperties,
    ticket: &TicketProperties,
    owner_name: Option<String>,
) -> DirectoryContact {
    let mut embedded = BTreeMap::new();
    put(&mut embedded, "closed_date", &ticket.closed_date);
    put(&mut embedded, "issue_category", &ticket.issue_category);
    put(&mut embedded, "ticket_id", &ticket.hs_object_id);
    put(&mut embedded, "time_to_close", &ticket.time_to_close);
    put(
        &mut embedded,
        "revenue_classification",
        &ticket.revenue_classification,
    );
    put(&mut embedded, "ip_timezone", &contact.hs_ip_timezone);
    put(
        &mut embedded,
        "qualtrics_first_name",
        &contact.qualtrics_first_name,
    );
    put(
        &mut embedded,
        "qualtrics_last_name",
        &contact.qualtrics_last_name,
    );
    put(&mut embedded, "company", &contact.company);
    put(&mut embedded, "qualtrics_region", &contact.qualtrics_region);
    put(&mut embedded, "ticket_owner_name", &owner_name);

    DirectoryContact {
        first_name: non_empty(&contact.firstname).unwrap_or_else(|| "valued".to_string()),
        last_name: non_empty(&contact.lastname).unwrap_or_else(|| "customer".to_string()),
        email: contact.email.clone(),
        ext_ref: ticket.hubspot_owner_id.clone(),
        embedded_data: embedded,
        unsubscribed: false,
    }
}

fn put(map: &mut BTreeMap<String, String>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            map.insert(key.to_string(), value.clone());
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssociationRef, AssociationResults, TicketAssociations};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, 14).unwrap()
    }

    fn survey_config() -> SurveysConfig {
        SurveysConfig::default()
    }

    fn exportable_ticket() -> Ticket {
        Ticket {
            id: "900".to_string(),
            properties: TicketProperties {
                closed_date: Some("2022-03-14T08:30:00Z".to_string()),
                issue_category: Some("Billing".to_string()),
                hs_pipeline: Some("0".to_string()),
                hs_object_id: Some("900".to_string()),
                hubspot_owner_id: Some("77".to_string()),
                ..TicketProperties::default()
            },
            associations: Some(TicketAssociations {
                contacts: AssociationResults {
                    results: vec![AssociationRef {
                        id: "12".to_string(),
                    }],
                },
            }),
        }
    }

    #[test]
    fn accepts_recently_closed_support_ticket() {
        assert!(is_exportable(&exportable_ticket(), &survey_config(), day()));
    }

    #[test]
    fn rejects_ticket_without_contacts() {
        let mut ticket = exportable_ticket();
        ticket.associations = None;
        assert!(!is_exportable(&ticket, &survey_config(), day()));
    }

    #[test]
    fn rejects_other_pipelines_and_excluded_categories() {
        let mut ticket = exportable_ticket();
        ticket.properties.hs_pipeline = Some("5".to_string());
        assert!(!is_exportable(&ticket, &survey_config(), day()));

        let mut ticket = exportable_ticket();
        ticket.properties.issue_category = Some("Security Concerns".to_string());
        assert!(!is_exportable(&ticket, &survey_config(), day()));
    }

    #[test]
    fn rejects_tickets_closed_on_other_days() {
        let mut ticket = exportable_ticket();
        ticket.properties.closed_date = Some("2022-03-13T23:59:00Z".to_string());
        assert!(!is_exportable(&ticket, &survey_config(), day()));

        let mut ticket = exportable_ticket();
        ticket.properties.closed_date = None;
        assert!(!is_exportable(&ticket, &survey_config(), day()));
    }

    #[test]
    fn closed_on_matches_calendar_day_only() {
        assert!(closed_on("2022-03-14T00:00:01Z", day()));
        assert!(closed_on("2022-03-14", day()));
        assert!(!closed_on("2022-03-15T00:00:01Z", day()));
        assert!(!closed_on("garbage", day()));
    }

    #[test]
    fn blocked_email_filter() {
        assert!(is_blocked_email(
            &Some("jo@circle.com".to_string()),
            "circle.com"
        ));
        assert!(!is_blocked_email(
            &Some("jo@example.com".to_string()),
            "circle.com"
        ));
        assert!(!is_blocked_email(&None, "circle.com"));
    }

    #[test]
    fn directory_contact_defaults_names() {
        let contact = ContactProperties {
            email: Some("jo@example.com".to_string()),
            ..ContactProperties::default()
        };
        let ticket = exportable_ticket().properties;

        let export = build_directory_contact(&contact, &ticket, None);
        assert_eq!(export.first_name, "valued");
        assert_eq!(export.last_name, "customer");
        assert_eq!(export.ext_ref.as_deref(), Some("77"));
        assert!(!export.unsubscribed);
    }

    #[test]
    fn embedded_data_keeps_only_present_values() {
        let contact = ContactProperties {
            email: Some("jo@example.com".to_string()),
            firstname: Some("Jo".to_string()),
            company: Some("Example Inc".to_string()),
            hs_ip_timezone: Some("".to_string()),
            ..ContactProperties::default()
        };
        let ticket = exportable_ticket().properties;

        let export = build_directory_contact(&contact, &ticket, Some("Ada Lovelace".to_string()));
        assert_eq!(export.first_name, "Jo");
        assert_eq!(
            export.embedded_data.get("ticket_owner_name").map(String::as_str),
            Some("Ada Lovelace")
        );
        assert_eq!(
            export.embedded_data.get("company").map(String::as_str),
            Some("Example Inc")
        );
        assert_eq!(export.embedded_data.get("ticket_id").map(String::as_str), Some("900"));
        // Empty strings never land in the embedded data
        assert!(!export.embedded_data.contains_key("ip_timezone"));
        // Unset ticket fields are absent
        assert!(!export.embedded_data.contains_key("time_to_close"));
    }
}
