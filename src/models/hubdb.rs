//! HubSpot HubDB wire payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `GET /tables/{table}/rows`.
#[derive(Debug, Clone, Deserialize)]
pub struct RowsResponse {
    pub results: Vec<Row>,
}

/// An existing table row.
#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    pub id: String,

    /// Column values; free-form since each table has its own schema
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl Row {
    /// The row's `id` column value, if it has one.
    pub fn id_value(&self) -> Option<&str> {
        self.values.get("id").and_then(Value::as_str)
    }
}

/// Body of `POST /tables/{table}/rows/draft/batch/purge`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchPurgeRequest {
    pub inputs: Vec<String>,
}

/// Body of `POST /tables/{table}/rows`.
#[derive(Debug, Clone, Serialize)]
pub struct RowInput {
    pub path: String,
    pub name: String,
    pub values: Map<String, Value>,
}

/// Draft values patched onto one metrics row.
///
/// Fields are optional so the same shape serves both the Circle supply data
/// and the CoinGecko volume data; absent fields are left untouched by the
/// PATCH.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoinValues {
    /// Run timestamp in epoch milliseconds, as a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_date: Option<String>,

    /// Abbreviated dollar supply, e.g. "$44.5B"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,

    /// Abbreviated dollar 24h volume, e.g. "$3.1B"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_volume_24h: Option<String>,
}

/// Wrapper giving draft PATCH bodies their `{ "values": ... }` shape.
#[derive(Debug, Clone, Serialize)]
pub struct DraftPatch<T: Serialize> {
    pub values: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_value_reads_string_column() {
        let row: Row = serde_json::from_str(
            r#"{"id": "101", "values": {"id": "ethereum", "total_supply": "$1.0B"}}"#,
        )
        .unwrap();
        assert_eq!(row.id_value(), Some("ethereum"));
    }

    #[test]
    fn id_value_absent_for_rows_without_id_column() {
        let row: Row = serde_json::from_str(r#"{"id": "101"}"#).unwrap();
        assert_eq!(row.id_value(), None);
    }

    #[test]
    fn coin_values_skips_absent_fields() {
        let values = CoinValues {
            trading_volume_24h: Some("$3.1B".to_string()),
            ..CoinValues::default()
        };
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"trading_volume_24h":"$3.1B"}"#);
    }
}
