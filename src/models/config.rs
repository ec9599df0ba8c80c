//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings shared by every job
    #[serde(default)]
    pub http: HttpConfig,

    /// Greenhouse job-board settings
    #[serde(default)]
    pub greenhouse: GreenhouseConfig,

    /// HubSpot HubDB table settings
    #[serde(default)]
    pub hubdb: HubDbConfig,

    /// HubSpot CRM settings
    #[serde(default)]
    pub crm: CrmConfig,

    /// Circle API settings
    #[serde(default)]
    pub circle: CircleConfig,

    /// CoinGecko API settings
    #[serde(default)]
    pub coingecko: CoinGeckoConfig,

    /// Qualtrics API settings
    #[serde(default)]
    pub qualtrics: QualtricsConfig,

    /// Stablecoin metrics job settings
    #[serde(default)]
    pub stablecoins: StablecoinsConfig,

    /// Ticket-to-survey export job settings
    #[serde(default)]
    pub surveys: SurveysConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if self.greenhouse.boards.is_empty() {
            return Err(AppError::validation("No greenhouse boards defined"));
        }
        if self.hubdb.listings_table.trim().is_empty() {
            return Err(AppError::validation("hubdb.listings_table is empty"));
        }
        if self.hubdb.metrics_table.trim().is_empty() {
            return Err(AppError::validation("hubdb.metrics_table is empty"));
        }
        if self.hubdb.yield_table.trim().is_empty() {
            return Err(AppError::validation("hubdb.yield_table is empty"));
        }
        if self.stablecoins.chains.is_empty() {
            return Err(AppError::validation("No stablecoin chains defined"));
        }
        if self.stablecoins.coins.is_empty() {
            return Err(AppError::validation("No tracked coins defined"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            greenhouse: GreenhouseConfig::default(),
            hubdb: HubDbConfig::default(),
            crm: CrmConfig::default(),
            circle: CircleConfig::default(),
            coingecko: CoinGeckoConfig::default(),
            qualtrics: QualtricsConfig::default(),
            stablecoins: StablecoinsConfig::default(),
            surveys: SurveysConfig::default(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent requests within a job stage
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Greenhouse job-board settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenhouseConfig {
    /// Greenhouse API root
    #[serde(default = "defaults::greenhouse_base_url")]
    pub base_url: String,

    /// Boards to aggregate, in merge order; the first board's department
    /// structure is authoritative
    #[serde(default = "defaults::boards")]
    pub boards: Vec<BoardConfig>,
}

impl Default for GreenhouseConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::greenhouse_base_url(),
            boards: defaults::boards(),
        }
    }
}

/// A single Greenhouse board to aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board identifier in the Greenhouse URL
    pub id: String,

    /// Text appended to job titles sourced from this board
    #[serde(default)]
    pub title_suffix: String,
}

/// HubSpot HubDB settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubDbConfig {
    /// HubDB API root
    #[serde(default = "defaults::hubdb_base_url")]
    pub base_url: String,

    /// Table holding one row per aggregated job listing
    #[serde(default = "defaults::listings_table")]
    pub listings_table: String,

    /// Table holding per-coin supply/volume metrics
    #[serde(default = "defaults::metrics_table")]
    pub metrics_table: String,

    /// Single-row table holding yield rates
    #[serde(default = "defaults::yield_table")]
    pub yield_table: String,
}

impl Default for HubDbConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::hubdb_base_url(),
            listings_table: defaults::listings_table(),
            metrics_table: defaults::metrics_table(),
            yield_table: defaults::yield_table(),
        }
    }
}

/// HubSpot CRM settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    /// HubSpot API root
    #[serde(default = "defaults::crm_base_url")]
    pub base_url: String,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::crm_base_url(),
        }
    }
}

/// Circle API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleConfig {
    /// Circle API root
    #[serde(default = "defaults::circle_base_url")]
    pub base_url: String,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::circle_base_url(),
        }
    }
}

/// CoinGecko API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinGeckoConfig {
    /// CoinGecko API root
    #[serde(default = "defaults::coingecko_base_url")]
    pub base_url: String,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::coingecko_base_url(),
        }
    }
}

/// Qualtrics API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualtricsConfig {
    /// Qualtrics datacenter root
    #[serde(default = "defaults::qualtrics_base_url")]
    pub base_url: String,
}

impl Default for QualtricsConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::qualtrics_base_url(),
        }
    }
}

/// Stablecoin metrics job settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StablecoinsConfig {
    /// Circle chain symbol to destination coin name mapping
    #[serde(default = "defaults::chains")]
    pub chains: Vec<ChainMapping>,

    /// Coin names (lowercased) whose 24h volume is pulled from CoinGecko
    #[serde(default = "defaults::coins")]
    pub coins: Vec<String>,
}

impl Default for StablecoinsConfig {
    fn default() -> Self {
        Self {
            chains: defaults::chains(),
            coins: defaults::coins(),
        }
    }
}

/// Mapping from a Circle chain symbol to a destination coin name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainMapping {
    /// Chain symbol as reported by Circle (e.g. "ETH")
    pub symbol: String,

    /// Coin name used as the row id in the metrics table
    pub coin: String,
}

/// Ticket-to-survey export job settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveysConfig {
    /// Pipeline id identifying support tickets
    #[serde(default = "defaults::support_pipeline")]
    pub support_pipeline: String,

    /// Issue category excluded from export
    #[serde(default = "defaults::excluded_issue_category")]
    pub excluded_issue_category: String,

    /// Contacts whose email contains this domain are not exported
    #[serde(default = "defaults::blocked_email_domain")]
    pub blocked_email_domain: String,
}

impl Default for SurveysConfig {
    fn default() -> Self {
        Self {
            support_pipeline: defaults::support_pipeline(),
            excluded_issue_category: defaults::excluded_issue_category(),
            blocked_email_domain: defaults::blocked_email_domain(),
        }
    }
}

mod defaults {
    use super::{BoardConfig, ChainMapping};

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; hubsync/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        5
    }

    // API roots
    pub fn greenhouse_base_url() -> String {
        "https://api.greenhouse.io".into()
    }
    pub fn hubdb_base_url() -> String {
        "https://api.hubapi.com/cms/v3/hubdb".into()
    }
    pub fn crm_base_url() -> String {
        "https://api.hubapi.com".into()
    }
    pub fn circle_base_url() -> String {
        "https://api.circle.com".into()
    }
    pub fn coingecko_base_url() -> String {
        "https://api.coingecko.com".into()
    }
    pub fn qualtrics_base_url() -> String {
        "https://iad1.qualtrics.com".into()
    }

    // Board defaults
    pub fn boards() -> Vec<BoardConfig> {
        vec![
            BoardConfig {
                id: "circle".to_string(),
                title_suffix: "".to_string(),
            },
            BoardConfig {
                id: "circlejobs".to_string(),
                title_suffix: " ".to_string(),
            },
            BoardConfig {
                id: "circlejobpostings".to_string(),
                title_suffix: " Perm".to_string(),
            },
        ]
    }

    // Table defaults
    pub fn listings_table() -> String {
        "4555547".into()
    }
    pub fn metrics_table() -> String {
        "5414018".into()
    }
    pub fn yield_table() -> String {
        "5272649".into()
    }

    // Stablecoin defaults
    pub fn chains() -> Vec<ChainMapping> {
        [
            ("ETH", "ethereum"),
            ("SOL", "solana"),
            ("TRX", "tron"),
            ("ALGO", "algorand"),
            ("XLM", "stellar"),
            ("AVAX", "avalanche"),
            ("FLOW", "flow"),
            ("HBAR", "hedera"),
        ]
        .into_iter()
        .map(|(symbol, coin)| ChainMapping {
            symbol: symbol.to_string(),
            coin: coin.to_string(),
        })
        .collect()
    }
    pub fn coins() -> Vec<String> {
        vec!["usd coin".to_string()]
    }

    // Survey defaults
    pub fn support_pipeline() -> String {
        "0".into()
    }
    pub fn excluded_issue_category() -> String {
        "Security Concerns".into()
    }
    pub fn blocked_email_domain() -> String {
        "circle.com".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_no_boards() {
        let mut config = Config::default();
        config.greenhouse.boards.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_or_default_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[http]
timeout_secs = 9

[[greenhouse.boards]]
id = "acme"
title_suffix = " Contract"
"#,
        )
        .unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config.http.timeout_secs, 9);
        assert_eq!(config.greenhouse.boards.len(), 1);
        assert_eq!(config.greenhouse.boards[0].id, "acme");
        assert_eq!(config.greenhouse.boards[0].title_suffix, " Contract");
        // Untouched sections fall back to defaults
        assert_eq!(config.surveys.support_pipeline, "0");
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("definitely/not/here.toml");
        assert!(config.validate().is_ok());
    }
}
