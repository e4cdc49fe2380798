use regex::Regex;
use scraper::{Html, Selector};

use crate::parsers::element_text;

/// Price label patterns compiled for both extraction tiers
///
/// The pattern list comes from configuration, so new label phrasings can
/// be added without touching the extraction logic.
#[derive(Debug)]
pub struct PriceLabels {
    /// Matches a structured key cell whose text names a price
    key: Regex,
    /// Matches `<label>[:] <number>` in flattened page text
    labeled_amount: Regex,
}

impl Default for PriceLabels {
    fn default() -> Self {
        Self::new(&crate::config::default_price_labels())
            .expect("default label patterns should be valid")
    }
}

impl PriceLabels {
    /// Compile a label pattern list into the matchers used by both tiers
    pub fn new(patterns: &[String]) -> Result<Self, regex::Error> {
        let alternation = patterns.join("|");
        let key = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?;
        let labeled_amount = Regex::new(&format!(
            r"(?i)\b(?:{alternation})\b\s*:?\s*([0-9][0-9 ,.]*)"
        ))?;
        Ok(Self {
            key,
            labeled_amount,
        })
    }

    fn key_matches(&self, text: &str) -> bool {
        self.key.is_match(text)
    }
}

/// Ordered extraction strategies; the first hit wins and later tiers are
/// not attempted
const STRATEGIES: &[fn(&Html, &PriceLabels) -> Option<u64>] = &[scan_info_rows, scan_free_text];

/// Attempts to locate a single integer price on an item page
///
/// Absence is `None`, never zero: a page that genuinely lists a price of
/// 0 yields `Some(0)`.
pub fn extract_price(html: &str, labels: &PriceLabels) -> Option<u64> {
    let doc = Html::parse_document(html);
    STRATEGIES.iter().find_map(|strategy| strategy(&doc, labels))
}

/// Tier 1: key/value pairs in box-like structures
///
/// Covers classic infobox rows (a `th` key beside a `td` value) and
/// portable infobox groups (`.pi-data-label` beside `.pi-data-value`).
fn scan_info_rows(doc: &Html, labels: &PriceLabels) -> Option<u64> {
    let row_sel = Selector::parse("tr").unwrap();
    let key_sel = Selector::parse("th").unwrap();
    let value_sel = Selector::parse("td").unwrap();

    for row in doc.select(&row_sel) {
        let Some(key) = row.select(&key_sel).next() else {
            continue;
        };
        let Some(value) = row.select(&value_sel).next() else {
            continue;
        };
        if !labels.key_matches(&element_text(key)) {
            continue;
        }
        if let Some(amount) = parse_amount(&element_text(value)) {
            ::log::debug!("Structured price hit: {} = {}", element_text(key), amount);
            return Some(amount);
        }
    }

    let group_sel = Selector::parse(".pi-data").unwrap();
    let label_sel = Selector::parse(".pi-data-label").unwrap();
    let data_sel = Selector::parse(".pi-data-value").unwrap();

    for group in doc.select(&group_sel) {
        let Some(label) = group.select(&label_sel).next() else {
            continue;
        };
        let Some(value) = group.select(&data_sel).next() else {
            continue;
        };
        if !labels.key_matches(&element_text(label)) {
            continue;
        }
        if let Some(amount) = parse_amount(&element_text(value)) {
            return Some(amount);
        }
    }

    None
}

/// Tier 2: a labelled number anywhere in the page's visible text
///
/// The body's text nodes are joined with newlines and the first labelled
/// amount wins; the label and its number may sit in adjacent nodes.
fn scan_free_text(doc: &Html, labels: &PriceLabels) -> Option<u64> {
    let content_sel = Selector::parse("body").unwrap();
    let text = doc
        .select(&content_sel)
        .flat_map(|node| node.text())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let captures = labels.labeled_amount.captures(&text)?;
    parse_amount(captures.get(1)?.as_str())
}

/// Parses the first digit run out of a piece of text
///
/// Space, comma and period are thousands separators, never decimal
/// points: prices are whole numbers. Returns `None` when no digits are
/// present; a malformed amount is logged and treated the same way.
pub fn parse_amount(text: &str) -> Option<u64> {
    let digit_run = Regex::new(r"[0-9][0-9 ,.]*").unwrap();
    let run = digit_run.find(text)?.as_str();
    let digits: String = run.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.parse::<u64>() {
        Ok(amount) => Some(amount),
        Err(e) => {
            ::log::debug!("Discarding unparseable amount {:?}: {}", run, e);
            None
        }
    }
}
