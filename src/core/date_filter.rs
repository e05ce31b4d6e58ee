use crate::core::dates::parse_date_value;
use crate::domain::model::{value_text, Row};
use chrono::NaiveDate;

/// Field consulted when a row carries no `originalDate`.
pub const DEFAULT_DATE_FIELD: &str = "date";

/// Keeps rows whose date falls inside the inclusive `[from, to]` range.
///
/// The comparison date comes from an `originalDate` field when one is present
/// and non-empty, otherwise from `date_field`. Rows with no resolvable or no
/// parseable date are retained: a bad date must never make data vanish from
/// the table.
pub fn filter_rows_by_date(
    rows: Vec<Row>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    date_field: &str,
) -> Vec<Row> {
    if from.is_none() && to.is_none() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            let primary = row
                .get("originalDate")
                .filter(|value| !value_text(value).is_empty());
            let Some(value) = primary.or_else(|| row.get(date_field)) else {
                return true;
            };
            let Some(date) = parse_date_value(value) else {
                return true;
            };
            if from.is_some_and(|from| date < from) {
                return false;
            }
            if to.is_some_and(|to| date > to) {
                return false;
            }
            true
        })
        .collect()
}
