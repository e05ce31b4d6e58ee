use crate::core::date_filter::{filter_rows_by_date, DEFAULT_DATE_FIELD};
use crate::core::dates::format_date_display;
use crate::core::paginate::paginate;
use crate::core::rewards::calculate_points;
use crate::core::search::search_rows;
use crate::core::sort::sort_rows;
use crate::domain::model::{
    Column, MonthlyReward, RewardSummary, Row, TableView, TotalReward, Transaction, ViewState,
};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

/// Applies the four table facets in their fixed order:
/// search -> date range -> sort -> paginate.
///
/// Sorting runs on the already-filtered set so tie positions reflect filtered
/// membership, and pagination runs on the fully sorted set so page boundaries
/// are stable between calls with the same state.
pub fn compute_view(all_rows: &[Row], state: &ViewState) -> TableView {
    let total_all = all_rows.len();
    let searched = search_rows(all_rows.to_vec(), state.search());
    let filtered = filter_rows_by_date(
        searched,
        state.from_date(),
        state.to_date(),
        DEFAULT_DATE_FIELD,
    );
    let total_filtered = filtered.len();
    let sorted = sort_rows(filtered, state.sort_key(), state.sort_order());
    let page_rows = paginate(&sorted, state.page(), state.rows_per_page());

    let total_pages = if state.rows_per_page() == 0 {
        1
    } else {
        total_filtered.div_ceil(state.rows_per_page()).max(1)
    };

    TableView {
        page_rows,
        total_filtered,
        total_all,
        total_pages,
        page: state.page(),
        rows_per_page: state.rows_per_page(),
    }
}

/// Projects raw transactions into display rows for the transactions view:
/// the reward points column is computed here and the purchase date is
/// rewritten to its day-first display form.
pub fn transaction_rows(transactions: &[Transaction]) -> Vec<Row> {
    transactions
        .iter()
        .map(|txn| {
            let mut row = Row::new();
            row.set("transactionId", txn.transaction_id.clone());
            row.set("customerName", txn.customer_name.clone());
            row.set("date", format_date_display(&txn.date));
            row.set("product", txn.product.clone());
            row.set("amount", amount_value(txn.amount));
            row.set("points", calculate_points(txn.amount));
            row
        })
        .collect()
}

/// Whole-dollar amounts display without a trailing `.0`.
fn amount_value(amount: f64) -> Value {
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() <= i64::MAX as f64 {
        Value::from(amount as i64)
    } else {
        Value::from(amount)
    }
}

pub fn monthly_reward_rows(summary: &RewardSummary) -> Vec<Row> {
    summary.monthly.iter().map(MonthlyReward::to_row).collect()
}

pub fn total_reward_rows(summary: &RewardSummary) -> Vec<Row> {
    summary.totals.iter().map(TotalReward::to_row).collect()
}

/// Renders the current page of a view to CSV, one column per descriptor,
/// header row from the labels.
pub fn render_page_csv(view: &TableView, columns: &[Column]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|column| column.label.as_str()))?;
    for row in &view.page_rows {
        writer.write_record(columns.iter().map(|column| row.text(&column.key)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| EtlError::ProcessingError {
            message: format!("CSV buffer flush failed: {e}"),
        })?;
    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("CSV output was not UTF-8: {e}"),
    })
}
