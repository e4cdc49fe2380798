use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::fetch::{Fetcher, Transport};
use crate::parsers::price::{PriceLabels, extract_price};
use crate::parsers::quantity::resolve_quantity;
use crate::results::Link;

/// Verdict for a single loot row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Recycle,
    Sell,
    Unknown,
}

impl Decision {
    /// Label used verbatim in all three output formats
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Recycle => "Recycle",
            Decision::Sell => "Sell",
            Decision::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares a row's own sell price against its recycled component value
///
/// Unknown unless both sides are known. Recycle only when the recycled
/// total strictly exceeds the sell price: ties favor Sell.
pub fn decide(sell_price: Option<u64>, recycled_total: Option<u64>) -> Decision {
    match (sell_price, recycled_total) {
        (Some(sell), Some(recycled)) => {
            if recycled > sell {
                Decision::Recycle
            } else {
                Decision::Sell
            }
        }
        _ => Decision::Unknown,
    }
}

/// Sums the quantity-weighted prices of a row's recycle components
///
/// Each component page is fetched and searched for a price; components
/// whose price cannot be found are skipped. Returns `None` when no
/// component price was found at all, which is distinct from a zero
/// total. A failed fetch aborts the run.
pub async fn recycled_total<T: Transport>(
    fetcher: &Fetcher<T>,
    base_url: &str,
    links: &[Link],
    cell_text: &str,
    labels: &PriceLabels,
    force: bool,
) -> Result<Option<u64>, LedgerError> {
    let mut total = 0u64;
    let mut found_any = false;

    for link in links {
        let url = format!("{base_url}{}", link.href);
        let html = fetcher.fetch(&url, force).await?;

        match extract_price(&html, labels) {
            Some(price) => {
                let quantity = resolve_quantity(&link.title, cell_text);
                total += price * quantity;
                found_any = true;
                ::log::debug!("Component {}: {} x {}", link.title, quantity, price);
            }
            None => {
                ::log::debug!("No price found for component {}", link.title);
            }
        }
    }

    Ok(if found_any { Some(total) } else { None })
}
