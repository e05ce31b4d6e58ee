use crate::domain::model::{value_text, Row};

/// Keeps rows where at least one field value contains `query`,
/// case-insensitively and anywhere in the text. Which field matches is
/// irrelevant. An empty query is the identity.
pub fn search_rows(rows: Vec<Row>, query: &str) -> Vec<Row> {
    if query.is_empty() {
        return rows;
    }
    let needle = query.to_lowercase();
    rows.into_iter()
        .filter(|row| {
            row.fields
                .values()
                .any(|value| value_text(value).to_lowercase().contains(&needle))
        })
        .collect()
}
