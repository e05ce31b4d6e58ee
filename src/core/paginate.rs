use crate::domain::model::Row;

/// The contiguous slice `[(page-1)*rows_per_page, page*rows_per_page)`,
/// clipped to the available rows. Out-of-range pages yield an empty page
/// rather than an error. Pages are 1-based.
pub fn paginate(rows: &[Row], page: usize, rows_per_page: usize) -> Vec<Row> {
    if page == 0 || rows_per_page == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(rows_per_page).min(rows.len());
    let end = start.saturating_add(rows_per_page).min(rows.len());
    rows[start..end].to_vec()
}
