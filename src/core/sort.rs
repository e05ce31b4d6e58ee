use crate::core::dates::parse_date_value;
use crate::domain::model::{value_text, Row, SortOrder};
use serde_json::Value;
use std::cmp::Ordering;

/// Field keys whose values are compared as dates rather than text.
const DATE_KEYS: [&str; 2] = ["date", "monthYear"];

/// Orders rows by the values under `key`. An empty key is the identity. The
/// underlying sort is stable, so equal keys keep their incoming relative
/// order and pagination stays reproducible across calls.
pub fn sort_rows(mut rows: Vec<Row>, key: &str, order: SortOrder) -> Vec<Row> {
    if key.is_empty() {
        return rows;
    }
    rows.sort_by(|a, b| {
        let ordering = compare_field(a.get(key), b.get(key), key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    rows
}

/// Comparison dispatch: absent values are equal (sparse rows must not fail),
/// date-keyed fields compare chronologically when both sides parse, numeric
/// pairs compare numerically, everything else falls back to text.
fn compare_field(a: Option<&Value>, b: Option<&Value>, key: &str) -> Ordering {
    let (Some(a), Some(b)) = (a, b) else {
        return Ordering::Equal;
    };

    if DATE_KEYS.contains(&key) {
        if let (Some(date_a), Some(date_b)) = (parse_date_value(a), parse_date_value(b)) {
            return date_a.cmp(&date_b);
        }
    }

    if let (Some(num_a), Some(num_b)) = (numeric_value(a), numeric_value(b)) {
        return num_a.partial_cmp(&num_b).unwrap_or(Ordering::Equal);
    }

    value_text(a).cmp(&value_text(b))
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}
