use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs the pipeline stages in their fixed order and reports progress.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting transaction feed");
        let transactions = self.pipeline.extract().await?;
        tracing::info!("Extracted {} transactions", transactions.len());

        tracing::info!("Computing reward tables");
        let bundle = self.pipeline.transform(transactions).await?;

        tracing::info!("Writing report archive");
        let output_path = self.pipeline.load(bundle).await?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(output_path)
    }
}
