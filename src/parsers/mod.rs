pub mod price;
pub mod quantity;
pub mod table;

#[cfg(test)]
mod tests;

use scraper::ElementRef;

/// Collapses internal whitespace and trims the ends of extracted text
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element with whitespace collapsed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}
