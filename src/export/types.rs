use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::errors::ExportError;

/// One exportable row: an insertion-ordered mapping from field name to value.
///
/// Relies on `serde_json`'s `preserve_order` feature so that projection and
/// header derivation keep the caller's field order.
pub type Record = Map<String, Value>;

/// Export formats supported by the service.
///
/// CSV and JSON are fully implemented. PDF and Excel currently produce a
/// textual preview with an estimated size; see
/// [`crate::export::writers::document_writer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    Csv,
    Json,
    Pdf,
    Excel,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Csv
    }
}

impl ExportFormat {
    /// File extension for this format.
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "xlsx",
        }
    }

    /// MIME type attached to the delivered file.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json;charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// True for formats that emit a textual preview instead of a real
    /// binary document.
    pub fn is_preview_only(&self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Excel)
    }

    /// Default filename for an export produced at `now`: `export_<YYYY-MM-DD>.<ext>`.
    pub fn default_filename(&self, now: DateTime<Utc>) -> String {
        format!(
            "export_{}.{}",
            now.format("%Y-%m-%d"),
            self.file_extension()
        )
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
        };
        f.write_str(name)
    }
}

/// Documentary date range carried into the JSON envelope. The writers do not
/// re-apply it as a filter; callers select records before exporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Caller-supplied knobs for a single export call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Overrides the synthesized `export_<date>.<ext>` filename.
    pub filename: Option<String>,
    /// CSV only: emit the header row. Defaults to true.
    pub include_headers: bool,
    /// Ordered allow-list restricting output columns/keys to exactly this
    /// set. A record missing one of these fields yields an empty value,
    /// never an error.
    pub fields: Option<Vec<String>>,
    /// Envelope metadata only.
    pub date_range: Option<DateRange>,
    /// Free-form description of the filtering the caller already applied,
    /// carried into the JSON envelope.
    pub filters: Option<Map<String, Value>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: None,
            include_headers: true,
            fields: None,
            date_range: None,
            filters: None,
        }
    }
}

/// High-level request coming from the UI describing what should be exported.
/// The format arrives as a plain string so a bad value surfaces as a failed
/// summary rather than a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub format: String,
    #[serde(flatten)]
    pub options: ExportOptions,
}

impl ExportRequest {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            options: ExportOptions::default(),
        }
    }

    pub fn with_options(format: impl Into<String>, options: ExportOptions) -> Self {
        Self {
            format: format.into(),
            options,
        }
    }
}

/// Finished artifact handed to the delivery collaborator.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: Vec<u8>,
    /// Preview-only formats report an estimated on-disk size here instead
    /// of the preview buffer length.
    pub size_hint: Option<u64>,
}

impl ExportFile {
    /// Byte size reported to the caller.
    pub fn reported_size(&self) -> u64 {
        self.size_hint.unwrap_or(self.content.len() as u64)
    }
}

/// Outcome returned to the caller after an export call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub success: bool,
    /// Empty on failure.
    pub filename: String,
    pub records_count: usize,
    /// Human-readable size, e.g. "12.34 KB".
    pub file_size: String,
    /// Present iff `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportSummary {
    pub fn succeeded(filename: String, records_count: usize, file_size: String) -> Self {
        Self {
            success: true,
            filename,
            records_count,
            file_size,
            error: None,
        }
    }

    pub fn failed(error: &ExportError) -> Self {
        Self {
            success: false,
            filename: String::new(),
            records_count: 0,
            file_size: String::new(),
            error: Some(error.to_string()),
        }
    }
}
