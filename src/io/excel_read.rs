use std::path::Path;

use calamine::{open_workbook, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, TabError};
use crate::io::TRUNCATION_MARKER;
use crate::model::{BoolLabels, ColumnSpec, Record, ValueType};
use crate::path::set_path;

/// Parses an xlsx file back into records, driven by the same `ColumnSpec`
/// list that produced it.
///
/// Only the first sheet is read. Row 0 must hold the headers and at least
/// one data row must follow. Each column spec is matched against the header
/// row by exact header equality; unmatched columns leave their field unset.
/// Rows whose every cell is blank are dropped before mapping.
pub fn parse_file(path: &Path, columns: &[ColumnSpec], labels: &BoolLabels) -> Result<Vec<Record>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TabError::InvalidImport("workbook contains no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| TabError::InvalidImport(format!("missing sheet '{sheet_name}'")))?
        .map_err(TabError::from)?;

    if range.height() < 2 {
        return Err(TabError::InvalidImport(
            "file must contain a header row and at least one data row".to_string(),
        ));
    }

    let headers: Vec<String> = match range.rows().next() {
        Some(first_row) => first_row.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };

    // Resolve each spec to the data column whose header matches exactly.
    let bound_columns: Vec<(usize, &ColumnSpec)> = columns
        .iter()
        .filter_map(|column| {
            headers
                .iter()
                .position(|header| header == &column.header)
                .map(|idx| (idx, column))
        })
        .collect();

    let mut records = Vec::new();
    for row in range.rows().skip(1) {
        if is_blank_row(row) {
            continue;
        }

        let mut record = Record::new();
        for (col_idx, column) in &bound_columns {
            let cell = row.get(*col_idx).unwrap_or(&DataType::Empty);
            let value = parse_cell_value(cell, column.value_type, labels, &column.key);
            set_path(&mut record, &column.key, value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Converts one raw cell into a typed value per the column's declared type.
/// Blank cells become null for every type.
pub fn parse_cell_value(
    cell: &DataType,
    value_type: ValueType,
    labels: &BoolLabels,
    key: &str,
) -> Value {
    if is_blank_cell(cell) {
        return Value::Null;
    }

    match value_type {
        ValueType::Boolean => parse_boolean(cell, labels),
        ValueType::Number => parse_number(cell),
        ValueType::Date => Value::String(parse_date(cell)),
        ValueType::String => parse_string(cell, key),
    }
}

fn parse_boolean(cell: &DataType, labels: &BoolLabels) -> Value {
    if let DataType::Bool(flag) = cell {
        return Value::Bool(*flag);
    }
    Value::Bool(labels.is_truthy(&cell_to_string(cell)))
}

fn parse_number(cell: &DataType) -> Value {
    let parsed = match cell {
        DataType::Float(value) => Some(*value),
        DataType::Int(value) => Some(*value as f64),
        other => cell_to_string(other).trim().parse::<f64>().ok(),
    };
    parsed
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn parse_date(cell: &DataType) -> String {
    match cell {
        DataType::Float(serial) | DataType::DateTime(serial) => {
            serial_to_iso(*serial).unwrap_or_else(|| cell_to_string(cell))
        }
        DataType::Int(serial) => {
            serial_to_iso(*serial as f64).unwrap_or_else(|| cell_to_string(cell))
        }
        other => {
            let text = cell_to_string(other).trim().to_string();
            if text.contains('/') {
                reformat_slash_date(&text).unwrap_or(text)
            } else {
                text
            }
        }
    }
}

fn parse_string(cell: &DataType, key: &str) -> Value {
    let text = cell_to_string(cell).trim().to_string();
    if text.is_empty() {
        return Value::Null;
    }
    if let Some(partial) = text.strip_suffix(TRUNCATION_MARKER) {
        warn!(
            field = key,
            "imported cell was truncated on export; the value is incomplete"
        );
        return Value::String(partial.to_string());
    }
    Value::String(text)
}

/// Converts an Excel date serial (days since 1899-12-30) into `YYYY-MM-DD`.
fn serial_to_iso(serial: f64) -> Option<String> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let offset = chrono::Duration::try_days(serial.floor() as i64)?;
    let date = base.checked_add_signed(offset)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Reinterprets an `MM/DD/YYYY` string as `YYYY-MM-DD`.
fn reformat_slash_date(text: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(text, "%m/%d/%Y").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}

fn is_blank_row(row: &[DataType]) -> bool {
    row.iter().all(is_blank_cell)
}

fn is_blank_cell(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
