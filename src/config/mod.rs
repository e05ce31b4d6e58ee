pub mod local;
pub mod view_file;

use crate::config::view_file::{ViewDefaults, ViewFileConfig};
use crate::domain::model::{SortOrder, TableColumns, ViewState};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rewards-etl")]
#[command(about = "Fetches purchase transactions and derives loyalty reward tables")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:3000/db.json")]
    pub api_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Free-text filter matched against every column.
    #[arg(long)]
    pub search: Option<String>,

    /// Column key to sort by (e.g. date, amount, points).
    #[arg(long)]
    pub sort_key: Option<String>,

    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    pub sort_order: SortOrder,

    /// Inclusive lower date bound, YYYY-MM-DD.
    #[arg(long)]
    pub from_date: Option<String>,

    /// Inclusive upper date bound, YYYY-MM-DD.
    #[arg(long)]
    pub to_date: Option<String>,

    /// Drop the default 90-day window and include every date.
    #[arg(long)]
    pub all_dates: bool,

    #[arg(long)]
    pub page: Option<usize>,

    #[arg(long)]
    pub rows_per_page: Option<usize>,

    /// Path to a TOML view definition file.
    #[arg(long)]
    pub view_config: Option<String>,

    /// Enable verbose output.
    #[arg(long)]
    pub verbose: bool,

    #[arg(skip)]
    #[serde(skip)]
    pub view_file: Option<ViewFileConfig>,
}

impl CliConfig {
    /// Loads and validates the view definition named by `--view-config`.
    pub fn load_view_file(&mut self) -> Result<()> {
        if let Some(path) = &self.view_config {
            let file = ViewFileConfig::from_path(path)?;
            file.validate()?;
            self.view_file = Some(file);
        }
        Ok(())
    }

    fn view_defaults(&self) -> Option<&ViewDefaults> {
        self.view_file.as_ref().and_then(|file| file.view.as_ref())
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    /// Command line wins over the view file, which wins over the built-in
    /// defaults. The page is applied last because every other setter resets
    /// it.
    fn view_state(&self, today: NaiveDate) -> ViewState {
        let defaults = self.view_defaults();
        let mut state = ViewState::new(today);

        let search = self
            .search
            .clone()
            .or_else(|| defaults.and_then(|d| d.search.clone()));
        if let Some(search) = search {
            state.set_search(search);
        }

        if let Some(key) = self.sort_key.clone() {
            state.set_sort(key, self.sort_order);
        } else if let Some(key) = defaults.and_then(|d| d.sort_key.clone()) {
            let order = defaults
                .and_then(|d| d.sort_order)
                .unwrap_or(self.sort_order);
            state.set_sort(key, order);
        }

        if self.all_dates {
            state.set_date_range(None, None);
        } else {
            let from = self
                .from_date
                .clone()
                .or_else(|| defaults.and_then(|d| d.from_date.clone()));
            let to = self
                .to_date
                .clone()
                .or_else(|| defaults.and_then(|d| d.to_date.clone()));
            if from.is_some() || to.is_some() {
                state.set_date_range(
                    from.as_deref()
                        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
                    to.as_deref()
                        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
                );
            }
        }

        let rows_per_page = self
            .rows_per_page
            .or_else(|| defaults.and_then(|d| d.rows_per_page));
        if let Some(rows_per_page) = rows_per_page {
            state.set_rows_per_page(rows_per_page);
        }

        let page = self.page.or_else(|| defaults.and_then(|d| d.page));
        if let Some(page) = page {
            state.set_page(page);
        }

        state
    }

    fn table_columns(&self) -> TableColumns {
        self.view_file
            .as_ref()
            .map(|file| file.resolve_columns())
            .unwrap_or_default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(rows_per_page) = self.rows_per_page {
            validation::validate_rows_per_page("rows_per_page", rows_per_page)?;
        }
        if let Some(page) = self.page {
            validation::validate_page_number("page", page)?;
        }
        if let Some(from_date) = &self.from_date {
            validation::validate_date_bound("from_date", from_date)?;
        }
        if let Some(to_date) = &self.to_date {
            validation::validate_date_bound("to_date", to_date)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            api_endpoint: "http://localhost:3000/db.json".to_string(),
            output_path: "./output".to_string(),
            search: None,
            sort_key: None,
            sort_order: SortOrder::Asc,
            from_date: None,
            to_date: None,
            all_dates: false,
            page: None,
            rows_per_page: None,
            view_config: None,
            verbose: false,
            view_file: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 7).unwrap()
    }

    #[test]
    fn test_defaults_keep_the_ninety_day_window() {
        let state = base_config().view_state(today());
        assert_eq!(
            state.from_date(),
            Some(NaiveDate::from_ymd_opt(2025, 5, 9).unwrap())
        );
        assert_eq!(state.to_date(), Some(today()));
        assert_eq!(state.rows_per_page(), 5);
    }

    #[test]
    fn test_all_dates_clears_the_window() {
        let mut config = base_config();
        config.all_dates = true;
        let state = config.view_state(today());
        assert_eq!(state.from_date(), None);
        assert_eq!(state.to_date(), None);
    }

    #[test]
    fn test_explicit_bounds_replace_the_window() {
        let mut config = base_config();
        config.from_date = Some("2025-01-01".to_string());
        let state = config.view_state(today());
        assert_eq!(
            state.from_date(),
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(state.to_date(), None);
    }

    #[test]
    fn test_requested_page_survives_other_settings() {
        let mut config = base_config();
        config.search = Some("coffee".to_string());
        config.sort_key = Some("amount".to_string());
        config.rows_per_page = Some(10);
        config.page = Some(3);
        let state = config.view_state(today());
        assert_eq!(state.page(), 3);
        assert_eq!(state.rows_per_page(), 10);
        assert_eq!(state.sort_key(), "amount");
    }

    #[test]
    fn test_cli_wins_over_view_file() {
        let mut config = base_config();
        config.search = Some("cli".to_string());
        config.view_file = Some(ViewFileConfig {
            view: Some(ViewDefaults {
                search: Some("file".to_string()),
                sort_key: Some("points".to_string()),
                sort_order: Some(SortOrder::Desc),
                ..Default::default()
            }),
            columns: None,
        });
        let state = config.view_state(today());
        assert_eq!(state.search(), "cli");
        // Unset on the CLI, so the file default applies.
        assert_eq!(state.sort_key(), "points");
        assert_eq!(state.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = base_config();
        config.rows_per_page = Some(7);
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.from_date = Some("15-01-2025".to_string());
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.api_endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
