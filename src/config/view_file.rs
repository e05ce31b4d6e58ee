use crate::domain::model::{Column, SortOrder, TableColumns};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional TOML view definition: column layouts plus view defaults that
/// apply wherever the command line stays silent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewFileConfig {
    pub view: Option<ViewDefaults>,
    pub columns: Option<ColumnOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewDefaults {
    pub search: Option<String>,
    pub sort_key: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub rows_per_page: Option<usize>,
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnOverrides {
    pub transactions: Option<Vec<Column>>,
    pub monthly_rewards: Option<Vec<Column>>,
    pub total_rewards: Option<Vec<Column>>,
}

impl ViewFileConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Built-in layouts with any per-view overrides applied.
    pub fn resolve_columns(&self) -> TableColumns {
        let mut columns = TableColumns::default();
        if let Some(overrides) = &self.columns {
            if let Some(transactions) = &overrides.transactions {
                columns.transactions = transactions.clone();
            }
            if let Some(monthly) = &overrides.monthly_rewards {
                columns.monthly_rewards = monthly.clone();
            }
            if let Some(totals) = &overrides.total_rewards {
                columns.total_rewards = totals.clone();
            }
        }
        columns
    }
}

impl Validate for ViewFileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(view) = &self.view {
            if let Some(rows_per_page) = view.rows_per_page {
                validation::validate_rows_per_page("view.rows_per_page", rows_per_page)?;
            }
            if let Some(page) = view.page {
                validation::validate_page_number("view.page", page)?;
            }
            if let Some(from_date) = &view.from_date {
                validation::validate_date_bound("view.from_date", from_date)?;
            }
            if let Some(to_date) = &view.to_date {
                validation::validate_date_bound("view.to_date", to_date)?;
            }
        }
        Ok(())
    }
}
