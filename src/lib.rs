// Re-export modules
pub mod config;
pub mod decide;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parsers;
pub mod results;

// Re-export commonly used types for convenience
pub use config::ScrapeConfig;
pub use decide::Decision;
pub use error::LedgerError;
pub use results::LootReport;

use std::path::Path;
use std::time::Duration;

use regex::Regex;
use url::Url;

use crate::decide::{decide, recycled_total};
use crate::fetch::{Fetcher, HttpTransport, PageCache, Transport};
use crate::parsers::price::{PriceLabels, parse_amount};
use crate::parsers::table::extract_table;

/// Header names of the two derived columns appended to every row
pub const RECYCLED_COLUMN: &str = "Recycled Sell Price";
pub const DECISION_COLUMN: &str = "Decision (Recycle/Sell)";

/// Builder for a loot scrape run
pub struct Ledger {
    config: ScrapeConfig,
    force_refetch: bool,
}

impl Ledger {
    /// Create a new run from a configuration
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            config,
            force_refetch: false,
        }
    }

    /// Load the run configuration from a JSON file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        Ok(Self::new(ScrapeConfig::from_file(path)?))
    }

    /// Re-fetch every page even when a cached copy exists
    pub fn with_force_refetch(mut self, force: bool) -> Self {
        self.force_refetch = force;
        self
    }

    /// Run the full pipeline with the real HTTP transport
    pub async fn run(&self) -> Result<LootReport, LedgerError> {
        let transport = HttpTransport::new(
            &self.config.user_agent,
            Duration::from_secs(self.config.request_timeout_secs),
        )?;
        let fetcher = Fetcher::new(
            transport,
            PageCache::new(self.config.cache_dir.as_str()),
            Duration::from_millis(self.config.fetch_delay_ms),
        );
        self.run_with(&fetcher).await
    }

    /// Run the pipeline against any transport
    ///
    /// Tests inject a canned transport here and never touch the network.
    pub async fn run_with<T: Transport>(
        &self,
        fetcher: &Fetcher<T>,
    ) -> Result<LootReport, LedgerError> {
        Url::parse(&self.config.base_url)?;

        let labels = PriceLabels::new(&self.config.price_label_patterns)?;
        let force = self.force_refetch;

        let loot_url = format!("{}{}", self.config.base_url, self.config.loot_path);
        ::log::info!("Scraping loot table from {}", loot_url);

        let html = fetcher.fetch(&loot_url, force).await?;
        let table = extract_table(&html, &self.config.link_prefix)?;

        let name_idx = find_column(&table.headers, &self.config.name_header_pattern)?;
        let sell_idx = find_column(&table.headers, &self.config.sell_header_pattern)?;
        let recycles_idx = find_column(&table.headers, &self.config.recycles_header_pattern)?;

        if sell_idx.is_none() {
            ::log::warn!("No header matched the sell price pattern; every row will be Unknown");
        }
        if recycles_idx.is_none() {
            ::log::warn!("No header matched the recycles pattern; every row will be Unknown");
        }

        let mut rows = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let name = name_idx
                .and_then(|i| row.cells.get(i))
                .map(String::as_str)
                .unwrap_or("");

            let sell_price = sell_idx
                .and_then(|i| row.cells.get(i))
                .and_then(|cell| parse_amount(cell));

            let recycled = match recycles_idx {
                Some(i) if i < row.links.len() => {
                    let cell_text = row.cells.get(i).map(String::as_str).unwrap_or("");
                    recycled_total(
                        fetcher,
                        &self.config.base_url,
                        &row.links[i],
                        cell_text,
                        &labels,
                        force,
                    )
                    .await?
                }
                _ => None,
            };

            let decision = decide(sell_price, recycled);
            ::log::info!(
                "{}: sell {:?}, recycled {:?} -> {}",
                name,
                sell_price,
                recycled,
                decision
            );

            let mut cells = row.cells.clone();
            cells.push(recycled.map(|v| v.to_string()).unwrap_or_default());
            cells.push(decision.to_string());
            rows.push(cells);
        }

        let mut headers = table.headers.clone();
        headers.push(RECYCLED_COLUMN.to_string());
        headers.push(DECISION_COLUMN.to_string());

        Ok(LootReport {
            headers,
            rows,
            generated_at: output::generation_timestamp(),
        })
    }
}

/// Finds the first header matching a pattern, case-insensitively
///
/// The match is substring-based, so a header like `Sell Price (Coins)`
/// still matches the `sell` pattern.
fn find_column(headers: &[String], pattern: &str) -> Result<Option<usize>, LedgerError> {
    let re = Regex::new(&format!("(?i){pattern}"))?;
    Ok(headers.iter().position(|header| re.is_match(header)))
}
