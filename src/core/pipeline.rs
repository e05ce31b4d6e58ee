use crate::core::rewards::aggregate_rewards;
use crate::core::view::{
    compute_view, monthly_reward_rows, render_page_csv, total_reward_rows, transaction_rows,
};
use crate::core::{ConfigProvider, Pipeline, Storage, Transaction, ViewBundle};
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const REPORT_FILE: &str = "rewards_report.zip";

/// Fetches the transaction feed, derives the three reward table views, and
/// bundles their CSV pages into a single report archive.
pub struct RewardsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    /// Reference date for the default view window, injected by the caller.
    today: NaiveDate,
}

impl<S: Storage, C: ConfigProvider> RewardsPipeline<S, C> {
    pub fn new(storage: S, config: C, today: NaiveDate) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
            today,
        }
    }
}

/// The feed is either the canonical `{ "transactions": [...] }` document or a
/// bare array of transactions.
fn parse_transaction_document(document: Value) -> Result<Vec<Transaction>> {
    let items = match document {
        Value::Array(_) => document,
        Value::Object(mut map) => {
            map.remove("transactions")
                .ok_or_else(|| EtlError::ProcessingError {
                    message: "Feed document has no 'transactions' array".to_string(),
                })?
        }
        other => {
            return Err(EtlError::ProcessingError {
                message: format!("Expected a transaction array or document, got {}", other),
            })
        }
    };
    Ok(serde_json::from_value(items)?)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RewardsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Transaction>> {
        tracing::debug!(
            "Requesting transactions from: {}",
            self.config.api_endpoint()
        );
        let response = self.client.get(self.config.api_endpoint()).send().await?;

        tracing::debug!("Feed response status: {}", response.status());
        let response = response.error_for_status()?;

        let document: Value = response.json().await?;
        let transactions = parse_transaction_document(document)?;
        tracing::debug!("Decoded {} transactions", transactions.len());
        Ok(transactions)
    }

    async fn transform(&self, transactions: Vec<Transaction>) -> Result<ViewBundle> {
        let state = self.config.view_state(self.today);
        let columns = self.config.table_columns();

        let txn_rows = transaction_rows(&transactions);
        let summary = aggregate_rewards(&transactions);
        tracing::debug!(
            "Aggregated {} monthly and {} total reward rows",
            summary.monthly.len(),
            summary.totals.len()
        );

        let transactions_view = compute_view(&txn_rows, &state);
        let monthly_rewards = compute_view(&monthly_reward_rows(&summary), &state);
        let total_rewards = compute_view(&total_reward_rows(&summary), &state);

        tracing::info!("Transactions: {}", transactions_view.info_line());
        tracing::info!("Monthly rewards: {}", monthly_rewards.info_line());
        tracing::info!("Total rewards: {}", total_rewards.info_line());

        let transactions_csv = render_page_csv(&transactions_view, &columns.transactions)?;
        let monthly_rewards_csv = render_page_csv(&monthly_rewards, &columns.monthly_rewards)?;
        let total_rewards_csv = render_page_csv(&total_rewards, &columns.total_rewards)?;

        Ok(ViewBundle {
            transactions: transactions_view,
            monthly_rewards,
            total_rewards,
            transactions_csv,
            monthly_rewards_csv,
            total_rewards_csv,
        })
    }

    async fn load(&self, bundle: ViewBundle) -> Result<String> {
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("transactions.csv", FileOptions::default())?;
            zip.write_all(bundle.transactions_csv.as_bytes())?;

            zip.start_file::<_, ()>("monthly_rewards.csv", FileOptions::default())?;
            zip.write_all(bundle.monthly_rewards_csv.as_bytes())?;

            zip.start_file::<_, ()>("total_rewards.csv", FileOptions::default())?;
            zip.write_all(bundle.total_rewards_csv.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing report archive ({} bytes)", zip_data.len());
        self.storage.write_file(REPORT_FILE, &zip_data).await?;

        Ok(format!("{}/{}", self.config.output_path(), REPORT_FILE))
    }
}
