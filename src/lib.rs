pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{local::LocalStorage, view_file::ViewFileConfig, CliConfig};
pub use crate::core::{etl::EtlEngine, pipeline::RewardsPipeline};
pub use crate::domain::model::{Row, SortOrder, TableView, Transaction, ViewState};
pub use crate::utils::error::{EtlError, Result};
