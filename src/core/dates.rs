use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Day-first display form: `15-1-2023` or `15/1/2023`.
fn day_first_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{4})$").expect("hard-coded pattern")
    })
}

/// Month grouping label form: `Aug 2025`.
fn month_year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{3} \d{4}$").expect("hard-coded pattern"))
}

/// Best-effort parse of a field value into a comparable date. Total: feeds
/// sorting and filtering, both of which degrade gracefully on bad data, so
/// every failure is `None` rather than an error.
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

/// Recognizes, in order: day-first `D-M-YYYY`/`D/M/YYYY`, ISO `YYYY-MM-DD`,
/// `Mon YYYY`, then a small set of generic textual forms.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(captures) = day_first_pattern().captures(raw) {
        let day: u32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let year: i32 = captures[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if month_year_pattern().is_match(raw) {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw} 1"), "%b %Y %d") {
            return Some(date);
        }
    }

    parse_generic(raw)
}

fn parse_generic(raw: &str) -> Option<NaiveDate> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(instant) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(instant.date());
        }
    }
    for format in ["%b %d, %Y", "%B %d, %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    None
}

/// Grouping label for monthly aggregation, e.g. `Aug 2025`.
pub fn month_year_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Rewrites a stored `YYYY-MM-DD` date into the unpadded day-first display
/// form (`15-1-2023`). Values already day-first pass through untouched, and
/// anything unrecognizable comes back unchanged.
pub fn format_date_display(raw: &str) -> String {
    if day_first_pattern().is_match(raw) {
        return raw.to_string();
    }
    if let Some(date) = parse_date_str(raw) {
        return format!("{}-{}-{}", date.day(), date.month(), date.year());
    }
    raw.to_string()
}
