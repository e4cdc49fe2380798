use regex::Regex;

/// Resolves how many units of a linked component a cell implies
///
/// Searches the cell text for `N x Title` or `N × Title` immediately
/// before the title, case-insensitively, with the title matched
/// literally. The first match wins; a title with no preceding quantity
/// marker counts as a single unit.
pub fn resolve_quantity(title: &str, cell_text: &str) -> u64 {
    if title.is_empty() {
        return 1;
    }

    let pattern = format!(r"(?i)(\d+)\s*[x×]\s*{}", regex::escape(title));
    match Regex::new(&pattern) {
        Ok(re) => re
            .captures(cell_text)
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(1),
        Err(_) => 1,
    }
}
