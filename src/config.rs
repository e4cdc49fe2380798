use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LedgerError;

/// Configuration for a loot scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Base URL of the wiki, scheme and host only
    pub base_url: String,

    /// Path of the loot table page, relative to the base URL
    #[serde(default = "default_loot_path")]
    pub loot_path: String,

    /// Prefix that marks a link target as internal to the wiki
    #[serde(default = "default_link_prefix")]
    pub link_prefix: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Pause after every network fetch, in milliseconds
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// Directory holding the on-disk page cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Patterns accepted as a price label, matched case-insensitively
    /// against infobox keys and free text
    #[serde(default = "default_price_labels")]
    pub price_label_patterns: Vec<String>,

    /// Pattern locating the item name column in the table header
    #[serde(default = "default_name_header")]
    pub name_header_pattern: String,

    /// Pattern locating the sell price column in the table header
    #[serde(default = "default_sell_header")]
    pub sell_header_pattern: String,

    /// Pattern locating the recycles-to column in the table header
    #[serde(default = "default_recycles_header")]
    pub recycles_header_pattern: String,
}

impl ScrapeConfig {
    /// Create a new configuration with default values for everything
    /// except the base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            loot_path: default_loot_path(),
            link_prefix: default_link_prefix(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            fetch_delay_ms: default_fetch_delay_ms(),
            cache_dir: default_cache_dir(),
            price_label_patterns: default_price_labels(),
            name_header_pattern: default_name_header(),
            sell_header_pattern: default_sell_header(),
            recycles_header_pattern: default_recycles_header(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Default path of the loot table page
fn default_loot_path() -> String {
    "/wiki/Loot".to_string()
}

/// Default internal-link prefix
fn default_link_prefix() -> String {
    "/wiki/".to_string()
}

/// Default identifying User-Agent
fn default_user_agent() -> String {
    "loot-ledger/0.1 (recycle value scraper)".to_string()
}

/// Default per-request timeout
fn default_request_timeout_secs() -> u64 {
    20
}

/// Default courtesy pause after a network fetch
fn default_fetch_delay_ms() -> u64 {
    500
}

/// Default page cache directory
fn default_cache_dir() -> String {
    ".page_cache".to_string()
}

/// Default price label synonyms
pub(crate) fn default_price_labels() -> Vec<String> {
    vec![
        r"sell\s*price".to_string(),
        "price".to_string(),
        "value".to_string(),
    ]
}

/// Default item name column pattern
fn default_name_header() -> String {
    "item|name".to_string()
}

/// Default sell price column pattern
fn default_sell_header() -> String {
    "sell".to_string()
}

/// Default recycles-to column pattern
fn default_recycles_header() -> String {
    "recycl".to_string()
}
