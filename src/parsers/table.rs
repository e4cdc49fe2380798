use scraper::{ElementRef, Html, Selector};

use crate::error::LedgerError;
use crate::parsers::element_text;
use crate::results::{Link, RawTable, Row};

/// Extracts the first table in the document into headers and data rows
///
/// Headers are the visible text of every header cell in document order.
/// Each row with at least one data cell becomes a `Row`; pure header or
/// separator rows are skipped. A cell's link list carries every contained
/// hyperlink whose target starts with `link_prefix`, so external links
/// never enter the pipeline.
pub fn extract_table(html: &str, link_prefix: &str) -> Result<RawTable, LedgerError> {
    let doc = Html::parse_document(html);

    let table_sel = Selector::parse("table").unwrap();
    let table = doc.select(&table_sel).next().ok_or(LedgerError::NoTable)?;

    let header_sel = Selector::parse("th").unwrap();
    let headers: Vec<String> = table.select(&header_sel).map(element_text).collect();

    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let mut rows = Vec::new();
    for tr in table.select(&row_sel) {
        let mut cells = Vec::new();
        let mut links = Vec::new();
        for td in tr.select(&cell_sel) {
            cells.push(element_text(td));
            links.push(cell_links(td, link_prefix));
        }
        if cells.is_empty() {
            // Header or separator row
            continue;
        }
        rows.push(Row { cells, links });
    }

    ::log::debug!(
        "Extracted table with {} headers and {} rows",
        headers.len(),
        rows.len()
    );

    Ok(RawTable { headers, rows })
}

/// Collects the internal links inside one cell
fn cell_links(cell: ElementRef<'_>, link_prefix: &str) -> Vec<Link> {
    let anchor_sel = Selector::parse("a").unwrap();
    cell.select(&anchor_sel)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !href.starts_with(link_prefix) {
                return None;
            }
            Some(Link::new(element_text(anchor), href))
        })
        .collect()
}
