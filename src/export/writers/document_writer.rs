//! Preview stand-ins for the document formats.
//!
//! Real PDF and spreadsheet generation is not wired in yet; until a document
//! library is integrated these writers emit a plain-text summary of what the
//! finished file would contain, together with an estimated size. Callers can
//! tell them apart from real output via [`ExportFormat::is_preview_only`].

use chrono::Utc;
use serde_json::Value;

use crate::errors::ExportCoreResult;
use crate::export::types::{ExportFormat, Record};
use crate::export::writers::csv_writer::cell_text;

/// Rows included verbatim in the preview before it truncates.
const PREVIEW_ROW_LIMIT: usize = 10;

// Rough per-file and per-record costs of the eventual binary formats, used
// only for the size reported in the summary.
const PDF_BASE_BYTES: u64 = 2048;
const PDF_BYTES_PER_RECORD: u64 = 160;
const EXCEL_BASE_BYTES: u64 = 1536;
const EXCEL_BYTES_PER_RECORD: u64 = 120;

/// Build the textual preview for a PDF or Excel export and the size the
/// summary should report for it.
pub fn write(
    format: ExportFormat,
    records: &[Record],
    columns: &[String],
) -> ExportCoreResult<(Vec<u8>, u64)> {
    let label = match format {
        ExportFormat::Pdf => "PDF",
        ExportFormat::Excel => "Excel",
        other => {
            return Err(crate::errors::ExportError::InvalidConfig(format!(
                "document writer cannot produce {other} output"
            )))
        }
    };

    let mut preview = String::new();
    preview.push_str(&format!("Aid distribution export ({label} preview)\n"));
    preview.push_str(&format!("Generated: {}\n", Utc::now().to_rfc3339()));
    preview.push_str(&format!("Records: {}\n", records.len()));
    preview.push_str(&format!("Columns: {}\n\n", columns.join(", ")));

    for record in records.iter().take(PREVIEW_ROW_LIMIT) {
        let row = columns
            .iter()
            .map(|name| format!("{}={}", name, preview_cell(record.get(name.as_str()))))
            .collect::<Vec<_>>()
            .join(" | ");
        preview.push_str(&row);
        preview.push('\n');
    }
    if records.len() > PREVIEW_ROW_LIMIT {
        preview.push_str(&format!(
            "... {} more record(s)\n",
            records.len() - PREVIEW_ROW_LIMIT
        ));
    }
    preview.push_str(&format!(
        "\n[{label} rendering is not implemented; this file is a preview only]\n"
    ));

    let estimated = estimated_size(format, records.len());
    Ok((preview.into_bytes(), estimated))
}

fn preview_cell(value: Option<&Value>) -> String {
    let text = cell_text(value);
    if text.is_empty() {
        "-".to_string()
    } else {
        text
    }
}

fn estimated_size(format: ExportFormat, records: usize) -> u64 {
    match format {
        ExportFormat::Pdf => PDF_BASE_BYTES + PDF_BYTES_PER_RECORD * records as u64,
        ExportFormat::Excel => EXCEL_BASE_BYTES + EXCEL_BYTES_PER_RECORD * records as u64,
        _ => 0,
    }
}
