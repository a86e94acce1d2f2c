use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::io::excel_read;
use crate::io::excel_write;
use crate::model::{BoolLabels, ColumnSpec, Record, SortDirective};
use crate::sort::sort_records;

/// Loads a column spec list from a JSON file.
pub fn load_columns(path: &Path) -> Result<Vec<ColumnSpec>> {
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

/// Loads a record collection from a JSON file holding an array of objects.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let json_string = serde_json::to_string_pretty(records)?;
    fs::write(path, json_string)?;
    Ok(())
}

/// Exports a JSON record file to `{dir}/{name}.xlsx`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), name = %name)
)]
pub fn json_to_xlsx(
    input: &Path,
    columns_path: &Path,
    labels: &BoolLabels,
    dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    let columns = load_columns(columns_path)?;
    let records = load_records(input)?;
    info!(record_count = records.len(), "loaded records from JSON source");
    let output = excel_write::export_records(&records, &columns, labels, dir, name)?;
    debug!(output = %output.display(), "workbook written");
    Ok(output)
}

/// Writes a headers-only import template to `{dir}/{name}_template.xlsx`.
#[instrument(level = "info", skip_all, fields(name = %name))]
pub fn write_template(columns_path: &Path, dir: &Path, name: &str) -> Result<PathBuf> {
    let columns = load_columns(columns_path)?;
    let output = excel_write::create_template(&columns, dir, name)?;
    debug!(output = %output.display(), "template written");
    Ok(output)
}

/// Imports an xlsx file back into a JSON record file.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn xlsx_to_json(
    input: &Path,
    columns_path: &Path,
    labels: &BoolLabels,
    output: &Path,
) -> Result<()> {
    let columns = load_columns(columns_path)?;
    let records = excel_read::parse_file(input, &columns, labels)?;
    info!(record_count = records.len(), "parsed records from workbook");
    write_records(output, &records)
}

/// Sorts a JSON record file by one field and writes the reordered records.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), field = %field)
)]
pub fn sort_json(input: &Path, field: &str, descending: bool, output: &Path) -> Result<()> {
    let records = load_records(input)?;
    let directive = if descending {
        SortDirective::desc(field)
    } else {
        SortDirective::asc(field)
    };
    let sorted = sort_records(&records, &directive);
    info!(record_count = sorted.len(), "records sorted");
    write_records(output, &sorted)
}
