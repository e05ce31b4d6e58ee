use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One record in a tabular dataset: an open mapping from field name to value.
/// The table pipeline is column-agnostic; anything with fields can flow
/// through search, filtering, sorting and pagination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub fields: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Text form of a field for searching and CSV output. Missing fields and
    /// nulls render empty.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(value_text).unwrap_or_default()
    }
}

/// Coerces a field value to display text. Strings pass through unquoted;
/// `null` becomes the empty string so it can never satisfy a search match.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// A purchase record as delivered by the transaction feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "string_or_number")]
    pub transaction_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub customer_id: String,
    pub customer_name: String,
    /// ISO-8601 date (`YYYY-MM-DD`) in the canonical feed; tolerated as any
    /// string since bad dates must degrade gracefully downstream.
    pub date: String,
    pub product: String,
    pub amount: f64,
}

/// Feeds disagree on whether ids are strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Reward points earned by one customer within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReward {
    pub customer_id: String,
    pub customer_name: String,
    /// Grouping label, e.g. `"Aug 2025"`.
    pub month_year: String,
    pub points: i64,
    /// Earliest transaction date contributing to this month.
    pub original_date: String,
}

impl MonthlyReward {
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("customerId", self.customer_id.clone());
        row.set("customerName", self.customer_name.clone());
        row.set("monthYear", self.month_year.clone());
        row.set("points", self.points);
        row.set("originalDate", self.original_date.clone());
        row
    }
}

/// Lifetime reward points for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalReward {
    pub customer_id: String,
    pub customer_name: String,
    pub points: i64,
    /// Latest transaction date contributing to the total.
    pub original_date: String,
}

impl TotalReward {
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("customerId", self.customer_id.clone());
        row.set("customerName", self.customer_name.clone());
        row.set("points", self.points);
        row.set("originalDate", self.original_date.clone());
        row
    }
}

/// Output of the reward aggregation step, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardSummary {
    pub monthly: Vec<MonthlyReward>,
    pub totals: Vec<TotalReward>,
}

/// A (field key, display label) pair describing one table column. Labels are
/// display-only; the pipeline never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub label: String,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Column layouts for the three shipped views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    pub transactions: Vec<Column>,
    pub monthly_rewards: Vec<Column>,
    pub total_rewards: Vec<Column>,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            transactions: vec![
                Column::new("transactionId", "Transaction ID"),
                Column::new("customerName", "Customer Name"),
                Column::new("date", "Purchase Date"),
                Column::new("product", "Product Purchased"),
                Column::new("amount", "Price ($)"),
                Column::new("points", "Reward Points"),
            ],
            monthly_rewards: vec![
                Column::new("customerId", "Customer ID"),
                Column::new("customerName", "Customer Name"),
                Column::new("monthYear", "Month"),
                Column::new("points", "Reward Points"),
            ],
            total_rewards: vec![
                Column::new("customerId", "Customer ID"),
                Column::new("customerName", "Customer Name"),
                Column::new("points", "Total Reward Points"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// How far back the default date window reaches when no bounds are given.
pub const DEFAULT_DATE_WINDOW_DAYS: u64 = 90;
pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

/// Mutable view parameters governing the visible slice of a dataset.
///
/// Changing search, sort, date bounds or page size snaps back to the first
/// page; a stale page index must never outlive the filter that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search: String,
    sort_key: String,
    sort_order: SortOrder,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    page: usize,
    rows_per_page: usize,
}

impl ViewState {
    /// Fresh state with the default window of the last
    /// [`DEFAULT_DATE_WINDOW_DAYS`] days. The reference date is injected so
    /// view computation stays deterministic under test.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            search: String::new(),
            sort_key: String::new(),
            sort_order: SortOrder::Asc,
            from_date: Some(today - Days::new(DEFAULT_DATE_WINDOW_DAYS)),
            to_date: Some(today),
            page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Empty means unsorted.
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn from_date(&self) -> Option<NaiveDate> {
        self.from_date
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        self.to_date
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, key: impl Into<String>, order: SortOrder) {
        self.sort_key = key.into();
        self.sort_order = order;
        self.page = 1;
    }

    /// `None` on both sides disables date filtering entirely.
    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.from_date = from;
        self.to_date = to;
        self.page = 1;
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// One computed page of a view plus the counts the presentation layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub page_rows: Vec<Row>,
    pub total_filtered: usize,
    pub total_all: usize,
    pub total_pages: usize,
    pub page: usize,
    pub rows_per_page: usize,
}

impl TableView {
    /// The "showing X-Y of Z" line.
    pub fn info_line(&self) -> String {
        if self.page_rows.is_empty() {
            return format!("Showing 0 of {} records", self.total_filtered);
        }
        let start = (self.page - 1) * self.rows_per_page + 1;
        let end = start + self.page_rows.len() - 1;
        if self.total_filtered == self.total_all {
            format!(
                "Showing {}-{} of {} records",
                start, end, self.total_filtered
            )
        } else {
            format!(
                "Showing {}-{} of {} records (filtered from {})",
                start, end, self.total_filtered, self.total_all
            )
        }
    }
}

/// Output of the transform stage: the three computed views and their CSV
/// renderings, ready for the load stage to bundle.
#[derive(Debug, Clone)]
pub struct ViewBundle {
    pub transactions: TableView,
    pub monthly_rewards: TableView,
    pub total_rewards: TableView,
    pub transactions_csv: String,
    pub monthly_rewards_csv: String,
    pub total_rewards_csv: String,
}
