use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::error::LedgerError;
use crate::results::LootReport;

/// UTC generation timestamp in the `YYYY-MM-DDTHH:MM:SSZ` form
pub fn generation_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Renders the report as a Markdown pipe table
pub fn markdown_table(report: &LootReport) -> String {
    let mut out = String::new();

    out.push_str("| ");
    out.push_str(&report.headers.join(" | "));
    out.push_str(" |\n|");
    out.push_str(&"---|".repeat(report.headers.len()));
    out.push('\n');

    for row in &report.rows {
        out.push_str("| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
    }

    out
}

/// Writes the JSON, CSV and Markdown outputs together
///
/// Parent directories are created first. This is only called after a
/// fully successful run, so a run that fails mid-way leaves every
/// destination untouched.
pub fn write_reports(
    report: &LootReport,
    json_path: &Path,
    csv_path: &Path,
    md_path: &Path,
) -> Result<(), LedgerError> {
    for path in [json_path, csv_path, md_path] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
    }

    fs::write(json_path, serde_json::to_string_pretty(report)?)?;

    let mut writer = csv::Writer::from_path(csv_path)?;
    writer.write_record(&report.headers)?;
    for row in &report.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    fs::write(md_path, markdown_table(report))?;

    ::log::info!(
        "Wrote {}, {} and {}",
        json_path.display(),
        csv_path.display(),
        md_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> LootReport {
        LootReport {
            headers: vec![
                "Item".to_string(),
                "Sell Price".to_string(),
                "Recycled Sell Price".to_string(),
                "Decision (Recycle/Sell)".to_string(),
            ],
            rows: vec![
                vec![
                    "Widget".to_string(),
                    "500".to_string(),
                    "300".to_string(),
                    "Sell".to_string(),
                ],
                vec![
                    "Gizmo, deluxe".to_string(),
                    "100".to_string(),
                    String::new(),
                    "Unknown".to_string(),
                ],
            ],
            generated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_markdown_table_shape() {
        let md = markdown_table(&sample_report());
        let lines: Vec<&str> = md.lines().collect();

        assert_eq!(
            lines[0],
            "| Item | Sell Price | Recycled Sell Price | Decision (Recycle/Sell) |"
        );
        assert_eq!(lines[1], "|---|---|---|---|");
        assert_eq!(lines[2], "| Widget | 500 | 300 | Sell |");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_write_reports_produces_all_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("out/loot.json");
        let csv_path = dir.path().join("out/loot.csv");
        let md_path = dir.path().join("out/loot.md");

        write_reports(&sample_report(), &json_path, &csv_path, &md_path).unwrap();

        let json = fs::read_to_string(&json_path).unwrap();
        assert!(json.contains("\"generated_at\": \"2026-01-01T00:00:00Z\""));
        assert!(json.contains("\"Widget\""));

        let csv_text = fs::read_to_string(&csv_path).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next(),
            Some("Item,Sell Price,Recycled Sell Price,Decision (Recycle/Sell)")
        );
        assert_eq!(lines.next(), Some("Widget,500,300,Sell"));
        // Embedded comma forces standard quoting
        assert_eq!(lines.next(), Some("\"Gizmo, deluxe\",100,,Unknown"));

        let md = fs::read_to_string(&md_path).unwrap();
        assert!(md.starts_with("| Item |"));
    }

    #[test]
    fn test_generation_timestamp_shape() {
        let stamp = generation_timestamp();
        assert_eq!(stamp.len(), 20);
        assert!(stamp.ends_with('Z'));
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], "T");
    }
}
