pub mod date_filter;
pub mod dates;
pub mod etl;
pub mod paginate;
pub mod pipeline;
pub mod rewards;
pub mod search;
pub mod sort;
pub mod view;

pub use crate::domain::model::{
    Column, MonthlyReward, RewardSummary, Row, SortOrder, TableColumns, TableView, TotalReward,
    Transaction, ViewBundle, ViewState,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
