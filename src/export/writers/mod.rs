pub mod csv_writer;
pub mod document_writer;
pub mod json_writer;

use crate::errors::ExportCoreResult;
use crate::export::types::{ExportFile, ExportFormat, ExportOptions, Record};

/// Columns/keys actually emitted: the caller's allow-list when given,
/// otherwise the first record's key set in insertion order. Later records
/// are projected onto this set by the writers.
pub fn effective_columns(records: &[Record], options: &ExportOptions) -> Vec<String> {
    match options.fields.as_ref() {
        Some(fields) => fields.clone(),
        None => records
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default(),
    }
}

/// Dispatch to the format-specific writer and package the result with its
/// MIME type. Assumes the service has already rejected empty batches.
pub fn encode(
    format: ExportFormat,
    records: &[Record],
    options: &ExportOptions,
    filename: String,
) -> ExportCoreResult<ExportFile> {
    let (content, size_hint) = match format {
        ExportFormat::Csv => {
            let columns = effective_columns(records, options);
            let bytes = csv_writer::write(records, &columns, options.include_headers)?;
            (bytes, None)
        }
        ExportFormat::Json => (json_writer::write(records, options)?, None),
        ExportFormat::Pdf | ExportFormat::Excel => {
            let columns = effective_columns(records, options);
            let (bytes, estimated) = document_writer::write(format, records, &columns)?;
            (bytes, Some(estimated))
        }
    };

    Ok(ExportFile {
        filename,
        mime_type: format.mime_type(),
        content,
        size_hint,
    })
}
