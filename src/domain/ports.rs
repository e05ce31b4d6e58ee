use crate::domain::model::{TableColumns, Transaction, ViewBundle, ViewState};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    /// View parameters resolved against `today` (the default date window is
    /// relative to it).
    fn view_state(&self, today: NaiveDate) -> ViewState;
    fn table_columns(&self) -> TableColumns;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Transaction>>;
    async fn transform(&self, transactions: Vec<Transaction>) -> Result<ViewBundle>;
    async fn load(&self, bundle: ViewBundle) -> Result<String>;
}
