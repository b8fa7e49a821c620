//! Timestamped JSON and CSV artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use quotescan_records::{ImageScan, ProcurementRecord};
use tracing::info;

/// Column order for the procurement CSV.
const CSV_FIELDS: [&str; 7] = [
    "item_name",
    "specification",
    "quantity",
    "unit_price",
    "currency",
    "source_text",
    "confidence",
];

fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Write all scans as pretty JSON under `output_dir`.
pub fn export_json(scans: &[ImageScan], output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {:?}", output_dir))?;

    let path = output_dir.join(format!("ocr_{}.json", timestamp()));
    let body = serde_json::to_string_pretty(scans).context("Failed to serialize scans")?;
    fs::write(&path, body).with_context(|| format!("Failed to write {:?}", path))?;

    info!("JSON exported to {:?}", path);
    Ok(path)
}

/// Write the records as a CSV under `output_dir`.
///
/// The file starts with a UTF-8 BOM so spreadsheet tools pick up the
/// encoding. Returns `None` when there is nothing to export.
pub fn export_csv(records: &[ProcurementRecord], output_dir: &Path) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        info!("No records to export");
        return Ok(None);
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {:?}", output_dir))?;

    let path = output_dir.join(format!("procurement_{}.csv", timestamp()));

    let mut out = String::new();
    out.push('\u{feff}');
    out.push_str(&CSV_FIELDS.join(","));
    out.push_str("\r\n");

    for record in records {
        let row = [
            csv_field(record.item_name.as_deref().unwrap_or_default()),
            csv_field(record.specification.as_deref().unwrap_or_default()),
            number_field(record.quantity),
            number_field(record.unit_price),
            csv_field(&record.currency),
            csv_field(&record.source_text),
            record.confidence.to_string(),
        ];
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }

    fs::write(&path, out).with_context(|| format!("Failed to write {:?}", path))?;

    info!("CSV exported to {:?}", path);
    Ok(Some(path))
}

/// Quote a CSV field per RFC 4180.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn number_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProcurementRecord {
        ProcurementRecord {
            item_name: Some("灯带".to_string()),
            specification: Some("灯带3.4米".to_string()),
            quantity: None,
            unit_price: Some(3.8),
            currency: "CNY".to_string(),
            source_text: "灯带3.4米 3.8元, 你要不要".to_string(),
            confidence: 1.0,
        }
    }

    #[test]
    fn json_artifact_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let scans = vec![ImageScan::from_lines(
            "a.png".to_string(),
            "input_images/a.png".to_string(),
            Vec::new(),
        )];

        let path = export_json(&scans, dir.path()).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("ocr_"));

        let body = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ImageScan> = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].image, "a.png");
    }

    #[test]
    fn csv_has_bom_header_and_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_csv(&[sample_record()], dir.path()).unwrap().unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with('\u{feff}'));

        let mut rows = body.trim_start_matches('\u{feff}').split("\r\n");
        assert_eq!(
            rows.next().unwrap(),
            "item_name,specification,quantity,unit_price,currency,source_text,confidence"
        );
        // source_text contains a comma, so it must be quoted.
        assert_eq!(
            rows.next().unwrap(),
            "灯带,灯带3.4米,,3.8,CNY,\"灯带3.4米 3.8元, 你要不要\",1"
        );
    }

    #[test]
    fn csv_escapes_embedded_quotes() {
        assert_eq!(csv_field("a\"b"), "\"a\"\"b\"");
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn empty_record_set_skips_the_csv() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_csv(&[], dir.path()).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
