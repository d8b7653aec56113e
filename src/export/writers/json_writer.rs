use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ExportCoreResult;
use crate::export::types::{DateRange, ExportOptions, Record};

/// Envelope wrapped around the exported rows so downstream reviewers can
/// audit when a file was produced and what filtering the caller applied.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    export_date: DateTime<Utc>,
    total_records: usize,
    filters: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_range: Option<&'a DateRange>,
    data: Vec<Record>,
}

/// Encode records as a pretty-printed JSON envelope. When a field allow-list
/// is supplied each record is projected onto it in that order; missing
/// fields are omitted from the projected object.
pub fn write(records: &[Record], options: &ExportOptions) -> ExportCoreResult<Vec<u8>> {
    let data: Vec<Record> = match options.fields.as_deref() {
        Some(fields) => records
            .iter()
            .map(|record| project(record, fields))
            .collect(),
        None => records.to_vec(),
    };

    let empty_filters = Map::new();
    let envelope = ExportEnvelope {
        export_date: Utc::now(),
        total_records: records.len(),
        filters: options.filters.as_ref().unwrap_or(&empty_filters),
        date_range: options.date_range.as_ref(),
        data,
    };

    Ok(serde_json::to_vec_pretty(&envelope)?)
}

fn project(record: &Record, fields: &[String]) -> Record {
    let mut projected = Record::new();
    for field in fields {
        if let Some(value) = record.get(field.as_str()) {
            projected.insert(field.clone(), value.clone());
        }
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_envelope_shape() {
        let records = vec![record(json!({"name": "Amina", "packages": 3}))];
        let options = ExportOptions {
            filters: Some(record(json!({"region": "north"}))),
            ..ExportOptions::default()
        };

        let bytes = write(&records, &options).unwrap();
        let envelope: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(envelope["totalRecords"], json!(1));
        assert_eq!(envelope["filters"], json!({"region": "north"}));
        assert_eq!(envelope["data"], json!([{"name": "Amina", "packages": 3}]));
        assert!(envelope["exportDate"].is_string());
        assert!(envelope.get("dateRange").is_none());
    }

    #[test]
    fn test_filters_default_to_empty_object() {
        let records = vec![record(json!({"name": "Amina"}))];
        let bytes = write(&records, &ExportOptions::default()).unwrap();
        let envelope: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope["filters"], json!({}));
    }

    #[test]
    fn test_date_range_carried_when_present() {
        let records = vec![record(json!({"name": "Amina"}))];
        let options = ExportOptions {
            date_range: Some(DateRange {
                from: "2024-01-01T00:00:00Z".parse().unwrap(),
                to: "2024-01-31T00:00:00Z".parse().unwrap(),
            }),
            ..ExportOptions::default()
        };

        let bytes = write(&records, &options).unwrap();
        let envelope: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(envelope["dateRange"]["from"].is_string());
        assert!(envelope["dateRange"]["to"].is_string());
    }

    #[test]
    fn test_projection_preserves_field_order() {
        let records = vec![record(json!({"a": 1, "b": 2, "c": 3}))];
        let options = ExportOptions {
            fields: Some(vec!["c".to_string(), "a".to_string()]),
            ..ExportOptions::default()
        };

        let bytes = write(&records, &options).unwrap();
        let envelope: Value = serde_json::from_slice(&bytes).unwrap();
        let row = envelope["data"][0].as_object().unwrap();

        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["c", "a"]);
        assert_eq!(row["c"], json!(3));
        assert_eq!(row["a"], json!(1));
    }

    #[test]
    fn test_projection_omits_missing_fields() {
        let records = vec![record(json!({"a": 1}))];
        let options = ExportOptions {
            fields: Some(vec!["a".to_string(), "ghost".to_string()]),
            ..ExportOptions::default()
        };

        let bytes = write(&records, &options).unwrap();
        let envelope: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope["data"][0], json!({"a": 1}));
    }

    #[test]
    fn test_unprojected_records_pass_through_unmodified() {
        let original = record(json!({"nested": {"city": "Amman"}, "tags": ["food", "winter"]}));
        let bytes = write(std::slice::from_ref(&original), &ExportOptions::default()).unwrap();
        let envelope: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope["data"][0], Value::Object(original));
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let records = vec![record(json!({"name": "Amina"}))];
        let bytes = write(&records, &ExportOptions::default()).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("  \"data\""));
    }
}
