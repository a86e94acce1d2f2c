use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, Workbook};
use serde_json::Value;

use crate::error::Result;
use crate::io::{
    DATA_SHEET, DEFAULT_COLUMN_WIDTH, TEMPLATE_SHEET, TRUNCATION_MARKER, XLSX_CELL_CHAR_LIMIT,
};
use crate::model::{BoolLabels, ColumnSpec, Record};
use crate::path::get_path;

/// A cell value ready for the xlsx writer.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or stored-null field; the cell is left blank.
    Empty,
    /// Written as a native numeric cell.
    Number(f64),
    /// Written as a text cell, already truncated to the format's ceiling.
    Text(String),
}

/// Writes the records to `{dir}/{filename}.xlsx` as a single sheet named
/// "Data": one header row, then one row per record with each cell resolved
/// at the column's dot-path. Returns the path written.
pub fn export_records(
    records: &[Record],
    columns: &[ColumnSpec],
    labels: &BoolLabels,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf> {
    let output = dir.join(format!("{filename}.xlsx"));
    write_sheet(&output, DATA_SHEET, records, columns, labels)?;
    Ok(output)
}

/// Writes a blank import template to `{dir}/{filename}_template.xlsx`: the
/// header row only, on a sheet named "Template". Returns the path written.
pub fn create_template(columns: &[ColumnSpec], dir: &Path, filename: &str) -> Result<PathBuf> {
    let output = dir.join(format!("{filename}_template.xlsx"));
    write_sheet(&output, TEMPLATE_SHEET, &[], columns, &BoolLabels::default())?;
    Ok(output)
}

fn write_sheet(
    output: &Path,
    sheet_name: &str,
    records: &[Record],
    columns: &[ColumnSpec],
    labels: &BoolLabels,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9E1F2));

    for (col_idx, column) in columns.iter().enumerate() {
        let col_idx = col_idx as u16;
        worksheet.write_string_with_format(0, col_idx, &column.header, &header_format)?;
        worksheet.set_column_width(col_idx, column.width.unwrap_or(DEFAULT_COLUMN_WIDTH))?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row_idx = (row_idx + 1) as u32;
        for (col_idx, column) in columns.iter().enumerate() {
            let col_idx = col_idx as u16;
            match format_cell_value(get_path(record, &column.key), labels) {
                CellValue::Empty => {}
                CellValue::Number(number) => {
                    worksheet.write_number(row_idx, col_idx, number)?;
                }
                CellValue::Text(text) => {
                    worksheet.write_string(row_idx, col_idx, &text)?;
                }
            }
        }
    }

    workbook.save(output)?;
    Ok(())
}

/// Converts a resolved record value into a writable cell value. Strings and
/// serialized objects longer than the xlsx per-cell ceiling are truncated
/// with [`TRUNCATION_MARKER`] appended, making the loss detectable on
/// import.
pub fn format_cell_value(value: Option<&Value>, labels: &BoolLabels) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Empty,
        Some(Value::Bool(flag)) => CellValue::Text(labels.render(*flag).to_string()),
        Some(Value::Number(number)) => CellValue::Number(number.as_f64().unwrap_or(0.0)),
        Some(Value::String(text)) => CellValue::Text(truncate_to_limit(text)),
        Some(other) => CellValue::Text(truncate_to_limit(&other.to_string())),
    }
}

fn truncate_to_limit(text: &str) -> String {
    if text.chars().count() <= XLSX_CELL_CHAR_LIMIT {
        return text.to_string();
    }
    let keep = XLSX_CELL_CHAR_LIMIT - TRUNCATION_MARKER.len() - 2;
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
