//! HubSpot CRM wire payloads.

use serde::Deserialize;

/// One page of a CRM object listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResponse<T> {
    pub results: Vec<T>,

    /// Present only when another page follows
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl<T> PagedResponse<T> {
    /// Cursor for the next page, if any.
    pub fn next_cursor(&self) -> Option<&str> {
        self.paging.as_ref().map(|p| p.next.after.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    pub next: PagingNext,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagingNext {
    pub after: String,
}

/// A CRM line item. Property values arrive as strings or null.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    pub id: String,

    #[serde(default)]
    pub properties: LineItemProperties,
}

/// The properties involved in the projected-revenue formula.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemProperties {
    #[serde(default)]
    pub expected_monthly_transactions: Option<String>,

    #[serde(default)]
    pub fixed_fee: Option<String>,

    #[serde(default)]
    pub expected_monthly_volume: Option<String>,

    #[serde(default)]
    pub interest_rate: Option<String>,

    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub projected_revenue: Option<String>,
}

/// A CRM support ticket with its contact associations.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    pub id: String,

    pub properties: TicketProperties,

    #[serde(default)]
    pub associations: Option<TicketAssociations>,
}

/// Ticket properties consumed by the survey export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketProperties {
    #[serde(default)]
    pub closed_date: Option<String>,

    #[serde(default)]
    pub issue_category: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub time_to_close: Option<String>,

    #[serde(default)]
    pub hs_object_id: Option<String>,

    #[serde(default)]
    pub hs_pipeline: Option<String>,

    #[serde(default)]
    pub hubspot_owner_id: Option<String>,

    #[serde(default)]
    pub revenue_classification: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketAssociations {
    #[serde(default)]
    pub contacts: AssociationResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssociationResults {
    #[serde(default)]
    pub results: Vec<AssociationRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssociationRef {
    pub id: String,
}

/// A CRM contact record.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRecord {
    pub id: String,

    pub properties: ContactProperties,
}

/// Contact properties consumed by the survey export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactProperties {
    #[serde(default)]
    pub createdate: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub hs_ip_timezone: Option<String>,

    #[serde(default)]
    pub qualtrics_first_name: Option<String>,

    #[serde(default)]
    pub qualtrics_last_name: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub qualtrics_region: Option<String>,
}

/// A ticket owner, fetched to label exports with a human name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Owner {
    #[serde(rename = "firstName", default)]
    pub first_name: String,

    #[serde(rename = "lastName", default)]
    pub last_name: String,
}

impl Owner {
    /// Display name, e.g. "Ada Lovelace".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
