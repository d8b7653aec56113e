use serde_json::Value;

use crate::errors::ExportCoreResult;
use crate::export::types::Record;

/// UTF-8 byte-order mark, prefixed so spreadsheet applications detect the
/// encoding for non-Latin beneficiary names.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encode records as CSV against the given effective columns.
///
/// Quoting is minimal: a cell is quoted (with internal quotes doubled) iff
/// it contains a comma or a double quote. Embedded newlines do not trigger
/// quoting. Kept byte-compatible with the dashboard's existing export files
/// rather than upgraded to full RFC 4180 quoting.
pub fn write(
    records: &[Record],
    columns: &[String],
    include_headers: bool,
) -> ExportCoreResult<Vec<u8>> {
    let mut lines: Vec<String> = Vec::with_capacity(records.len() + 1);

    if include_headers {
        let header = columns
            .iter()
            .map(|name| escape_cell(name))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(header);
    }

    for record in records {
        let row = columns
            .iter()
            .map(|name| escape_cell(&cell_text(record.get(name.as_str()))))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    let mut out = Vec::with_capacity(UTF8_BOM.len() + lines.iter().map(|l| l.len() + 1).sum::<usize>());
    out.extend_from_slice(UTF8_BOM);
    out.extend_from_slice(lines.join("\n").as_bytes());
    Ok(out)
}

/// Default textual conversion applied before the escaping check. Absent and
/// null values render empty; nested values render as compact JSON text.
pub(crate) fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

fn escape_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
