use serde::{Deserialize, Serialize};

/// An internal wiki link found inside a table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Visible text of the link
    pub title: String,

    /// Raw target path, always under the internal link prefix
    pub href: String,
}

impl Link {
    /// Create a new link from its visible text and target path
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

/// One data row of the loot table
///
/// `cells` and `links` are parallel: one entry per column, so a
/// well-formed row always has `cells.len() == links.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Visible cell text, whitespace-collapsed, one entry per column
    pub cells: Vec<String>,

    /// Internal links per cell
    pub links: Vec<Vec<Link>>,
}

/// The loot table as parsed from the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    /// Header cell text in document order
    pub headers: Vec<String>,

    /// Data rows (rows with at least one data cell)
    pub rows: Vec<Row>,
}

/// Final augmented table, the shape written to every output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootReport {
    /// Column names: the original headers plus the two derived columns
    pub headers: Vec<String>,

    /// One entry per item: the original cells plus the recycled value
    /// (or empty string) and the decision label
    pub rows: Vec<Vec<String>>,

    /// UTC generation time, `YYYY-MM-DDTHH:MM:SSZ`
    pub generated_at: String,
}
