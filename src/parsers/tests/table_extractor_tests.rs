use crate::error::LedgerError;
use crate::parsers::table::extract_table;

#[cfg(test)]
mod tests {
    use super::*;

    const WIKI_PREFIX: &str = "/wiki/";

    #[test]
    fn test_extracts_headers_and_rows() {
        let html = r#"<html><body><table>
            <tr><th>Item</th><th>Sell Price</th><th>Recycles To</th></tr>
            <tr><td>Widget</td><td>500</td><td><a href="/wiki/Wires">Wires</a></td></tr>
            <tr><td>Gadget</td><td>250</td><td></td></tr>
        </table></body></html>"#;

        let table = extract_table(html, WIKI_PREFIX).unwrap();

        assert_eq!(table.headers, vec!["Item", "Sell Price", "Recycles To"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells, vec!["Widget", "500", "Wires"]);
        assert_eq!(table.rows[1].cells, vec!["Gadget", "250", ""]);
    }

    #[test]
    fn test_no_table_is_an_error() {
        let html = "<html><body><p>Nothing here</p></body></html>";
        let result = extract_table(html, WIKI_PREFIX);
        assert!(matches!(result, Err(LedgerError::NoTable)));
    }

    #[test]
    fn test_header_only_rows_are_skipped() {
        let html = r#"<table>
            <tr><th>Item</th><th>Price</th></tr>
            <tr><th>Section divider</th></tr>
            <tr><td>Widget</td><td>10</td></tr>
        </table>"#;

        let table = extract_table(html, WIKI_PREFIX).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells[0], "Widget");
    }

    #[test]
    fn test_cell_text_is_whitespace_collapsed() {
        let html = r#"<table>
            <tr><th>  Sell
                Price  </th></tr>
            <tr><td>
                <b>1,750</b>   coins
            </td></tr>
        </table>"#;

        let table = extract_table(html, WIKI_PREFIX).unwrap();
        assert_eq!(table.headers, vec!["Sell Price"]);
        assert_eq!(table.rows[0].cells, vec!["1,750 coins"]);
    }

    #[test]
    fn test_only_internal_links_are_kept() {
        let html = r#"<table>
            <tr><th>Recycles To</th></tr>
            <tr><td>
                <a href="/wiki/Wires">Wires</a>
                <a href="https://elsewhere.example.com/Wires">mirror</a>
                <a href="/Category/Loot">category</a>
            </td></tr>
        </table>"#;

        let table = extract_table(html, WIKI_PREFIX).unwrap();
        let links = &table.rows[0].links[0];

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Wires");
        assert_eq!(links[0].href, "/wiki/Wires");
    }

    #[test]
    fn test_cells_and_links_stay_parallel() {
        let html = r#"<table>
            <tr><th>A</th><th>B</th><th>C</th></tr>
            <tr>
                <td>plain</td>
                <td><a href="/wiki/X">X</a></td>
                <td><a href="/wiki/Y">Y</a> and <a href="/wiki/Z">Z</a></td>
            </tr>
        </table>"#;

        let table = extract_table(html, WIKI_PREFIX).unwrap();
        let row = &table.rows[0];

        assert_eq!(row.cells.len(), row.links.len());
        assert!(row.links[0].is_empty());
        assert_eq!(row.links[1].len(), 1);
        assert_eq!(row.links[2].len(), 2);
    }

    #[test]
    fn test_first_table_wins() {
        let html = r#"
            <table><tr><th>First</th></tr><tr><td>one</td></tr></table>
            <table><tr><th>Second</th></tr><tr><td>two</td></tr></table>
        "#;

        let table = extract_table(html, WIKI_PREFIX).unwrap();
        assert_eq!(table.headers, vec!["First"]);
        assert_eq!(table.rows[0].cells, vec!["one"]);
    }
}
