pub mod excel_read;
pub mod excel_write;

/// Sheet name used for data exports.
pub const DATA_SHEET: &str = "Data";
/// Sheet name used for blank import templates.
pub const TEMPLATE_SHEET: &str = "Template";

/// Per-cell character ceiling of the xlsx format. Values longer than this
/// are truncated on export.
pub const XLSX_CELL_CHAR_LIMIT: usize = 32_767;
/// Suffix appended to truncated cell values so the loss is detectable when
/// the file is imported again.
pub const TRUNCATION_MARKER: &str = "...[cut]";

/// Column width in character units applied when a column does not declare one.
pub const DEFAULT_COLUMN_WIDTH: f64 = 20.0;
