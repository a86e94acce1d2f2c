use std::cmp::Ordering;

use serde_json::Value;

use crate::model::{Record, SortDirection, SortDirective};
use crate::path::get_path;

/// Computes the directive that results from the user requesting a sort on
/// `requested`, given the current directive.
///
/// An empty or absent field clears the sort. Requesting the already-active
/// field toggles its direction. Requesting a different field always starts
/// ascending.
pub fn set_sort(current: &SortDirective, requested: Option<&str>) -> SortDirective {
    let requested = match requested {
        Some(field) if !field.is_empty() => field,
        _ => return SortDirective::none(),
    };

    if current.field.as_deref() == Some(requested) {
        // A directive carrying a field but no direction is not applied by
        // `sort_records`, so the toggle treats it as ascending.
        let next = match current.direction {
            Some(SortDirection::Desc) => SortDirection::Asc,
            _ => SortDirection::Desc,
        };
        return SortDirective {
            field: Some(requested.to_string()),
            direction: Some(next),
        };
    }

    SortDirective::asc(requested)
}

/// Returns a new, stably ordered copy of `records` per the directive.
///
/// A directive without both a field and a direction leaves the input order
/// untouched. The input is never mutated. Missing values (absent path or
/// stored null) sort last regardless of direction; ties keep their relative
/// input order.
pub fn sort_records(records: &[Record], directive: &SortDirective) -> Vec<Record> {
    let mut sorted: Vec<Record> = records.to_vec();

    let (Some(field), Some(direction)) = (&directive.field, directive.direction) else {
        return sorted;
    };
    if sorted.is_empty() {
        return sorted;
    }

    // slice::sort_by is stable, which the tie-breaking contract relies on.
    sorted.sort_by(|lhs, rhs| {
        compare_values(get_path(lhs, field), get_path(rhs, field), direction)
    });
    sorted
}

/// Total order over two resolved cell values. The missing-last rule is
/// applied before the direction sign, so missing values stay last for both
/// ascending and descending sorts.
fn compare_values(lhs: Option<&Value>, rhs: Option<&Value>, direction: SortDirection) -> Ordering {
    let lhs = lhs.filter(|value| !value.is_null());
    let rhs = rhs.filter(|value| !value.is_null());

    let ordering = match (lhs, rhs) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => compare_present(a, b),
    };

    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare_present(lhs: &Value, rhs: &Value) -> Ordering {
    match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => compare_ci(a, b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        // Mixed or non-scalar types fall back to a case-insensitive string
        // comparison. ISO dates are strings in this model, so this branch is
        // also chronological for them.
        (a, b) => compare_ci(&render(a), &render(b)),
    }
}

fn compare_ci(lhs: &str, rhs: &str) -> Ordering {
    lhs.to_lowercase().cmp(&rhs.to_lowercase())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(values: serde_json::Value) -> Vec<Record> {
        values
            .as_array()
            .expect("array literal")
            .iter()
            .map(|item| item.as_object().expect("object literal").clone())
            .collect()
    }

    fn field_values(records: &[Record], field: &str) -> Vec<Value> {
        records
            .iter()
            .map(|rec| get_path(rec, field).cloned().unwrap_or(Value::Null))
            .collect()
    }

    #[test]
    fn first_click_starts_ascending() {
        let next = set_sort(&SortDirective::none(), Some("name"));
        assert_eq!(next, SortDirective::asc("name"));
    }

    #[test]
    fn repeat_clicks_toggle_direction() {
        let first = set_sort(&SortDirective::none(), Some("name"));
        let second = set_sort(&first, Some("name"));
        assert_eq!(second, SortDirective::desc("name"));
        let third = set_sort(&second, Some("name"));
        assert_eq!(third, SortDirective::asc("name"));
    }

    #[test]
    fn switching_fields_resets_to_ascending() {
        let current = SortDirective::asc("name");
        let next = set_sort(&current, Some("age"));
        assert_eq!(next, SortDirective::asc("age"));
    }

    #[test]
    fn empty_or_absent_field_clears_sort() {
        let current = SortDirective::desc("name");
        assert_eq!(set_sort(&current, Some("")), SortDirective::none());
        assert_eq!(set_sort(&current, None), SortDirective::none());
    }

    #[test]
    fn directionless_directive_toggles_to_desc() {
        let current = SortDirective {
            field: Some("name".to_string()),
            direction: None,
        };
        assert_eq!(set_sort(&current, Some("name")), SortDirective::desc("name"));
    }

    #[test]
    fn no_directive_returns_input_order() {
        let input = records(json!([{"v": 3}, {"v": 1}, {"v": 2}]));
        let sorted = sort_records(&input, &SortDirective::none());
        assert_eq!(sorted, input);
    }

    #[test]
    fn sorts_numbers_numerically() {
        let input = records(json!([{"v": 10}, {"v": 2}, {"v": 33}]));
        let sorted = sort_records(&input, &SortDirective::asc("v"));
        assert_eq!(field_values(&sorted, "v"), vec![json!(2), json!(10), json!(33)]);
    }

    #[test]
    fn sorts_strings_case_insensitively() {
        let input = records(json!([{"v": "banana"}, {"v": "Apple"}, {"v": "cherry"}]));
        let sorted = sort_records(&input, &SortDirective::asc("v"));
        assert_eq!(
            field_values(&sorted, "v"),
            vec![json!("Apple"), json!("banana"), json!("cherry")]
        );
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let input = records(json!([{"v": 1}, {"v": null}, {"v": 2}]));

        let asc = sort_records(&input, &SortDirective::asc("v"));
        assert_eq!(field_values(&asc, "v"), vec![json!(1), json!(2), Value::Null]);

        let desc = sort_records(&input, &SortDirective::desc("v"));
        assert_eq!(field_values(&desc, "v"), vec![json!(2), json!(1), Value::Null]);
    }

    #[test]
    fn absent_field_sorts_like_null() {
        let input = records(json!([{"v": 1, "id": "a"}, {"id": "b"}, {"v": 0, "id": "c"}]));
        let sorted = sort_records(&input, &SortDirective::asc("v"));
        assert_eq!(
            field_values(&sorted, "id"),
            vec![json!("c"), json!("a"), json!("b")]
        );
    }

    #[test]
    fn ties_preserve_input_order() {
        let input = records(json!([
            {"v": 1, "id": "first"},
            {"v": 1, "id": "second"},
            {"v": 0, "id": "third"},
            {"v": 1, "id": "fourth"}
        ]));
        let sorted = sort_records(&input, &SortDirective::asc("v"));
        assert_eq!(
            field_values(&sorted, "id"),
            vec![json!("third"), json!("first"), json!("second"), json!("fourth")]
        );
    }

    #[test]
    fn resort_is_idempotent() {
        let input = records(json!([{"v": "b"}, {"v": "a"}, {"v": "b"}, {"v": "c"}]));
        let directive = SortDirective::desc("v");
        let once = sort_records(&input, &directive);
        let twice = sort_records(&once, &directive);
        assert_eq!(once, twice);
    }

    #[test]
    fn sorts_on_nested_paths() {
        let input = records(json!([
            {"person": {"name": "Siti"}},
            {"person": {"name": "Budi"}}
        ]));
        let sorted = sort_records(&input, &SortDirective::asc("person.name"));
        assert_eq!(
            field_values(&sorted, "person.name"),
            vec![json!("Budi"), json!("Siti")]
        );
    }

    #[test]
    fn mixed_types_compare_as_strings() {
        let input = records(json!([{"v": "zebra"}, {"v": 100}, {"v": true}]));
        let sorted = sort_records(&input, &SortDirective::asc("v"));
        // "100" < "true" < "zebra" case-insensitively.
        assert_eq!(
            field_values(&sorted, "v"),
            vec![json!(100), json!(true), json!("zebra")]
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let input = records(json!([{"v": 2}, {"v": 1}]));
        let snapshot = input.clone();
        let _ = sort_records(&input, &SortDirective::asc("v"));
        assert_eq!(input, snapshot);
    }
}
