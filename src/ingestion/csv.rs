//! CSV ingestion implementation.

use std::path::Path;

use super::NullMarkers;
use crate::error::{CleaningError, CleaningResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Read a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ); extra CSV columns are ignored.
/// - Cells matching `nulls` become [`Value::Null`]; everything else is parsed according to the
///   schema field type.
pub fn read_csv_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    nulls: &NullMarkers,
) -> CleaningResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    read_csv_reader(&mut rdr, schema, nulls)
}

/// Read CSV data from an existing CSV reader.
pub fn read_csv_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
    nulls: &NullMarkers,
) -> CleaningResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Schema field -> CSV column index.
    let col_idxs = schema
        .fields
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| h == field.name)
                .ok_or_else(|| CleaningError::SchemaMismatch {
                    message: format!(
                        "missing required column '{}'. headers={:?}",
                        field.name,
                        headers.iter().collect::<Vec<_>>()
                    ),
                })
        })
        .collect::<CleaningResult<Vec<_>>>()?;

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, and the header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let row = schema
            .fields
            .iter()
            .zip(&col_idxs)
            .map(|(field, &csv_idx)| {
                let raw = record.get(csv_idx).unwrap_or("");
                if nulls.is_null(raw) {
                    Ok(Value::Null)
                } else {
                    parse_typed_value(user_row, &field.name, field.data_type, raw)
                }
            })
            .collect::<CleaningResult<Vec<_>>>()?;
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), columns = schema.fields.len(), "read csv");
    Ok(DataSet::new(schema.clone(), rows))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> CleaningResult<Value> {
    let trimmed = raw.trim();
    let parse_error = |message: String| CleaningError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_error),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}
