use serde_json::Value;

use crate::model::Record;

/// Resolves a dot-path against a record, walking nested objects key by key.
///
/// Returns `None` when any level of the path is missing, which is distinct
/// from `Some(&Value::Null)` for a field that stores an explicit null. The
/// sort comparator and the cell formatter treat both as "missing", but
/// callers that need the distinction keep it.
pub fn get_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = record.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Assigns a value at a dot-path, creating intermediate objects as needed.
/// An intermediate that exists but is not an object is replaced.
pub fn set_path(record: &mut Record, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut map = record;
    for segment in parents {
        let slot = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(serde_json::Map::new());
        }
        map = match slot.as_object_mut() {
            Some(inner) => inner,
            None => return,
        };
    }
    map.insert(last.to_string(), value);
}
