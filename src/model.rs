use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of domain data: a string-keyed tree of scalar or nested values.
/// Records carry no fixed schema; fields are declared externally through a
/// [`ColumnSpec`] list and addressed by dot-path.
pub type Record = serde_json::Map<String, Value>;

/// Declares how one logical field maps to one spreadsheet column.
///
/// The order of a `ColumnSpec` list defines the spreadsheet column order, and
/// `key` must identify one field per list. On import, `header` is matched
/// exactly against the header row to locate the data column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Dot-path into the record, e.g. `"address.city"`.
    pub key: String,
    /// Display label written to (and matched against) the header row.
    pub header: String,
    /// Column width in character units. Defaults to 20 when unset.
    #[serde(default)]
    pub width: Option<f64>,
    /// Declared value type, used to parse imported cells. Explicit per-column
    /// annotation rather than inference from field naming conventions.
    #[serde(default)]
    pub value_type: ValueType,
}

impl ColumnSpec {
    /// Creates a string-typed column with the default width.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            value_type: ValueType::String,
        }
    }

    /// Sets the declared value type.
    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Sets the column width in character units.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

/// Value type annotation for a column, driving cell parsing on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Plain text. The default.
    #[default]
    String,
    /// Floating point number.
    Number,
    /// Boolean rendered through a [`BoolLabels`] pair.
    Boolean,
    /// Calendar date, normalised to `YYYY-MM-DD` on import.
    Date,
}

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The currently active sort: which field, and which way.
///
/// Either side being `None` means no sort is applied. The directive is
/// caller-owned state; [`crate::sort::set_sort`] returns a new directive
/// rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortDirective {
    pub field: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortDirective {
    /// The cleared directive: no field, no direction.
    pub fn none() -> Self {
        Self::default()
    }

    /// A directive sorting ascending by the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: Some(SortDirection::Asc),
        }
    }

    /// A directive sorting descending by the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: Some(SortDirection::Desc),
        }
    }
}

/// Label pair used to render booleans into cells and recognise them on
/// import. Configurable so deployments can localise the pair (for example
/// `"Ya"`/`"Tidak"`) without touching the conversion logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolLabels {
    pub truthy: String,
    pub falsy: String,
}

impl Default for BoolLabels {
    fn default() -> Self {
        Self {
            truthy: "Yes".to_string(),
            falsy: "No".to_string(),
        }
    }
}

impl BoolLabels {
    /// Renders a boolean as its configured label.
    pub fn render(&self, value: bool) -> &str {
        if value { &self.truthy } else { &self.falsy }
    }

    /// Whether a raw cell string should be read as `true`. Accepts the
    /// configured truthy label (case-insensitively), `"true"`, and `"1"`.
    pub fn is_truthy(&self, raw: &str) -> bool {
        let lowered = raw.trim().to_lowercase();
        lowered == self.truthy.to_lowercase() || lowered == "true" || lowered == "1"
    }
}
